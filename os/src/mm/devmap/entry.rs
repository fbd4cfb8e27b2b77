//! Static device map entries

use crate::mm::address::{Address, AlignOps, Paddr, PaddrRange, Vaddr, VaddrRange};
use crate::mm::page_table::{MemAttr, VmProt};
use core::fmt;

/// One fixed device region of the static device map
///
/// A table is a slice of these terminated by [`DevMapEntry::SENTINEL`] (size
/// zero) or by the end of the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevMapEntry {
    /// Virtual base
    pub va: Vaddr,
    /// Physical base
    pub pa: Paddr,
    /// Size in bytes, a multiple of the page size; zero marks the sentinel
    pub size: usize,
    /// Access protection
    pub prot: VmProt,
    /// Memory type
    pub attr: MemAttr,
}

impl DevMapEntry {
    /// Table terminator
    pub const SENTINEL: Self = Self::new(
        Vaddr::new(0),
        Paddr::new(0),
        0,
        VmProt::empty(),
        MemAttr::Device,
    );

    /// Entry with explicit attributes
    pub const fn new(va: Vaddr, pa: Paddr, size: usize, prot: VmProt, attr: MemAttr) -> Self {
        Self {
            va,
            pa,
            size,
            prot,
            attr,
        }
    }

    /// Read/write device registers
    pub const fn device(va: Vaddr, pa: Paddr, size: usize) -> Self {
        Self::new(va, pa, size, VmProt::RW, MemAttr::Device)
    }

    /// Whether this entry terminates the table
    pub fn is_sentinel(&self) -> bool {
        self.size == 0
    }

    /// Checks page alignment of both bases and the size, and that neither
    /// range wraps the address space.
    pub(super) fn is_well_formed(&self) -> bool {
        self.va.is_page_aligned()
            && self.pa.is_page_aligned()
            && self.size.is_page_aligned()
            && self.va.checked_add(self.size).is_some()
            && self.pa.checked_add(self.size).is_some()
    }

    /// Physical range covered; only meaningful for a well-formed entry.
    pub fn pa_range(&self) -> PaddrRange {
        PaddrRange::new(self.pa, self.pa + self.size)
    }

    /// Virtual range covered; only meaningful for a well-formed entry.
    pub fn va_range(&self) -> VaddrRange {
        VaddrRange::new(self.va, self.va + self.size)
    }

    /// Virtual address of `pa`, which must lie within the entry.
    pub fn ptov(&self, pa: Paddr) -> Vaddr {
        self.va + pa.offset_from(self.pa)
    }

    /// Physical address of `va`, which must lie within the entry.
    pub fn vtop(&self, va: Vaddr) -> Paddr {
        self.pa + va.offset_from(self.va)
    }
}

impl fmt::Display for DevMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pa {:#010x} - {:#010x} mapped at va {:#x} {} {}",
            self.pa,
            self.pa.raw().wrapping_add(self.size).wrapping_sub(1),
            self.va,
            self.prot,
            self.attr
        )
    }
}
