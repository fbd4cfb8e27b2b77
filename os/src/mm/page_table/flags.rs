//! Mapping attributes

use core::fmt;

bitflags::bitflags! {
    /// Access protection of a mapping (read/write/execute capability set)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VmProt: u8 {
        /// Readable
        const READ = 1 << 0;
        /// Writable
        const WRITE = 1 << 1;
        /// Executable
        const EXECUTE = 1 << 2;

        /// Read/write, the protection of device registers
        const RW = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl fmt::Display for VmProt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = if self.contains(VmProt::READ) { 'r' } else { '-' };
        let w = if self.contains(VmProt::WRITE) { 'w' } else { '-' };
        let x = if self.contains(VmProt::EXECUTE) { 'x' } else { '-' };
        write!(f, "{}{}{}", r, w, x)
    }
}

/// Memory type / cacheability of a mapping
///
/// Device registers must use one of the device types so the CPU neither caches
/// nor reorders accesses to them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemAttr {
    /// Device, strongly ordered (no gathering, reordering, or early ack)
    DeviceStronglyOrdered,
    /// Device, shared (the default for memory-mapped registers)
    Device,
    /// Normal memory, uncached
    Uncached,
    /// Normal memory, write-combining
    WriteCombining,
    /// Normal memory, write-through
    WriteThrough,
    /// Normal memory, write-back
    WriteBack,
}

impl MemAttr {
    /// Whether this is one of the device memory types
    pub const fn is_device(&self) -> bool {
        matches!(self, MemAttr::DeviceStronglyOrdered | MemAttr::Device)
    }

    /// Short name used in table dumps
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemAttr::DeviceStronglyOrdered => "device-so",
            MemAttr::Device => "device",
            MemAttr::Uncached => "uncached",
            MemAttr::WriteCombining => "wc",
            MemAttr::WriteThrough => "wt",
            MemAttr::WriteBack => "wb",
        }
    }
}

impl fmt::Display for MemAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
