//! Kernel virtual address space allocation
//!
//! Dynamic device mappings take their virtual ranges from a [`KvaAllocator`].
//! [`KvaArena`] is a first-fit allocator over a fixed window, and [`KERNEL_KVA`]
//! is the arena covering the kernel's device window.

mod arena;

pub use arena::KvaArena;

use crate::config::{KVA_DEVICE_END, KVA_DEVICE_START};
use crate::mm::address::{Vaddr, VaddrRange};
use lazy_static::lazy_static;

/// Reserves and releases page-granular ranges of kernel virtual address space
pub trait KvaAllocator: Sync {
    /// Reserves `size` bytes (a multiple of the page size). Returns the base
    /// address, or `None` if no suitable range is free.
    fn kva_alloc(&self, size: usize) -> Option<Vaddr>;

    /// Returns a range previously obtained from [`kva_alloc`](Self::kva_alloc).
    fn kva_free(&self, va: Vaddr, size: usize);
}

lazy_static! {
    /// Arena over the kernel device window
    pub static ref KERNEL_KVA: KvaArena = KvaArena::new(VaddrRange::new(
        Vaddr::new(KVA_DEVICE_START),
        Vaddr::new(KVA_DEVICE_END),
    ));
}
