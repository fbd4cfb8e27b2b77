//! Boot-time static table builder
//!
//! Platform code registers its fixed device regions here before bootstrap.
//! Virtual addresses are handed out downward from `va_top`, and the result is a
//! sentinel-terminated table ready for [`StaticDevMap::install`].
//!
//! [`StaticDevMap::install`]: super::StaticDevMap::install

use super::{DevMapEntry, DevMapError, DevMapResult};
use crate::config::SECTION_SIZE;
use crate::mm::address::{AlignOps, Paddr, Vaddr, page_span};
use crate::mm::page_table::{MemAttr, VmProt};
use crate::pr_debug;

/// Fixed-capacity table builder; needs no heap.
///
/// One of the `N` slots is kept for the terminating sentinel.
pub struct DevMapBuilder<const N: usize> {
    entries: [DevMapEntry; N],
    len: usize,
    va_top: Vaddr,
}

impl<const N: usize> DevMapBuilder<N> {
    /// Empty builder handing out virtual space below `va_top`
    pub const fn new(va_top: Vaddr) -> Self {
        Self {
            entries: [DevMapEntry::SENTINEL; N],
            len: 0,
            va_top,
        }
    }

    /// Maximum number of entries (the sentinel excluded)
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// Number of entries added
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entry has been added yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Next free virtual address; the static region lies at and above it.
    pub fn va_top(&self) -> Vaddr {
        self.va_top
    }

    /// Adds a read/write device mapping for `[pa, pa + size)`.
    ///
    /// Returns the virtual address corresponding to `pa`.
    pub fn add_entry(&mut self, pa: Paddr, size: usize) -> DevMapResult<Vaddr> {
        self.add_entry_attr(pa, size, VmProt::RW, MemAttr::Device)
    }

    /// Like [`add_entry`](Self::add_entry) with explicit attributes.
    pub fn add_entry_attr(
        &mut self,
        pa: Paddr,
        size: usize,
        prot: VmProt,
        attr: MemAttr,
    ) -> DevMapResult<Vaddr> {
        if self.len >= self.capacity() {
            return Err(DevMapError::TableFull {
                capacity: self.capacity(),
            });
        }
        if size == 0 {
            return Err(DevMapError::EmptyRange);
        }
        let (span, offset) = page_span(pa, size).ok_or(DevMapError::AddressOverflow)?;
        let len = span.len();

        let below = self
            .va_top
            .raw()
            .checked_sub(len)
            .ok_or(DevMapError::AddressOverflow)?;
        // whole sections get a section-aligned base so they can use block mappings
        let va = if span.start().is_aligned(SECTION_SIZE) && len.is_aligned(SECTION_SIZE) {
            Vaddr::new(below).align_down(SECTION_SIZE)
        } else {
            Vaddr::new(below)
        };

        self.entries[self.len] = DevMapEntry::new(va, span.start(), len, prot, attr);
        self.len += 1;
        self.va_top = va;
        pr_debug!(
            "devmap: reserved va {:#x} for pa {:#x} size {:#x}",
            va,
            span.start(),
            len
        );
        Ok(va + offset)
    }

    /// The table built so far, sentinel included
    pub fn entries(&self) -> &[DevMapEntry] {
        &self.entries[..(self.len + 1).min(N)]
    }
}
