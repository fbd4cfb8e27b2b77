//! constants for the device map core (platform-independent)
#![allow(unused)]

// about memory management
/// Smallest mapping granule
pub const PAGE_SIZE: usize = 4096;

/// Size of a first-level section mapping. Static entries whose physical base and
/// size are both multiples of this get a section-aligned virtual base.
pub const SECTION_SIZE: usize = 0x10_0000; // 1MB

// Kernel virtual address layout for device memory
// (from high to low address):
// [DEVMAP_VA_TOP]       <-- static device map entries grow downward from here
// [STATIC DEVMAP]
// ...
// [KVA_DEVICE_END]      <-- dynamic device mappings live in this window
// [KVA DEVICE WINDOW]
// [KVA_DEVICE_START]
//
// temporarily set for QEMU RISC-V virt machine (SV39 high half)
// TODO: fetch the window from the platform layer once it reports its kernel map
/// Top of the static device map window; entries are allocated below it
pub const DEVMAP_VA_TOP: usize = 0xffff_ffff_c000_0000;
/// Start of the dynamic device mapping window
pub const KVA_DEVICE_START: usize = 0xffff_ffd0_0000_0000;
/// End (exclusive) of the dynamic device mapping window
pub const KVA_DEVICE_END: usize = 0xffff_ffd0_4000_0000; // 1GB window

/// Capacity of the boot-time static table builder, sentinel slot included.
pub const DEVMAP_MAX_ENTRIES: usize = 32;
