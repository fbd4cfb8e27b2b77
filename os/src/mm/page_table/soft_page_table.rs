//! Software page table
//!
//! A page-granular translation table kept in a `BTreeMap`. It satisfies both
//! [`DevicePageMapper`] and [`EarlyMapper`] and is what host-side tests and early
//! bring-up run against.

use super::{DevicePageMapper, EarlyMapper, MemAttr, PagingError, PagingResult, VmProt};
use crate::config::PAGE_SIZE;
use crate::mm::address::{
    Address, AddressRange, AlignOps, Paddr, PageNum, Ppn, Vaddr, Vpn, VpnRange,
};
use crate::sync::SpinLock;
use alloc::collections::btree_map::BTreeMap;

/// A leaf translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftPte {
    /// Target physical page
    pub ppn: Ppn,
    /// Access protection
    pub prot: VmProt,
    /// Memory type
    pub attr: MemAttr,
}

/// Page-granular translation table held in memory
#[derive(Debug, Default)]
pub struct SoftPageTable {
    entries: SpinLock<BTreeMap<Vpn, SoftPte>>,
}

impl SoftPageTable {
    /// Empty table
    pub fn new() -> Self {
        Self {
            entries: SpinLock::new(BTreeMap::new()),
        }
    }

    /// Installs one leaf translation
    pub fn map(&self, va: Vaddr, pa: Paddr, prot: VmProt, attr: MemAttr) -> PagingResult<()> {
        if !va.is_page_aligned() || !pa.is_page_aligned() {
            return Err(PagingError::InvalidAddress);
        }
        let mut entries = self.entries.lock();
        let vpn = Vpn::from_addr_floor(va);
        if entries.contains_key(&vpn) {
            return Err(PagingError::AlreadyMapped);
        }
        entries.insert(
            vpn,
            SoftPte {
                ppn: Ppn::from_addr_floor(pa),
                prot,
                attr,
            },
        );
        Ok(())
    }

    /// Removes one leaf translation
    pub fn unmap(&self, va: Vaddr) -> PagingResult<()> {
        if !va.is_page_aligned() {
            return Err(PagingError::InvalidAddress);
        }
        match self.entries.lock().remove(&Vpn::from_addr_floor(va)) {
            Some(_) => Ok(()),
            None => Err(PagingError::NotMapped),
        }
    }

    /// Walks the table for `va`, keeping the page offset
    pub fn translate(&self, va: Vaddr) -> Option<Paddr> {
        let pte = self.entry(va)?;
        Some(pte.ppn.start_addr() + va.page_offset())
    }

    /// Leaf entry covering `va`
    pub fn entry(&self, va: Vaddr) -> Option<SoftPte> {
        self.entries.lock().get(&Vpn::from_addr_floor(va)).copied()
    }

    /// Number of pages currently mapped
    pub fn mapped_pages(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether any page of `range` is mapped
    pub fn any_mapped(&self, range: &AddressRange<Vaddr>) -> bool {
        let pages = VpnRange::covering(range);
        let entries = self.entries.lock();
        entries.range(pages.start()..pages.end()).next().is_some()
    }
}

impl DevicePageMapper for SoftPageTable {
    fn kenter(&self, va: Vaddr, pa: Paddr, attr: MemAttr) -> PagingResult<()> {
        self.map(va, pa, VmProt::RW, attr)
    }

    fn kremove(&self, va: Vaddr) -> PagingResult<()> {
        self.unmap(va)
    }
}

impl EarlyMapper for SoftPageTable {
    fn map_chunk(
        &mut self,
        va: Vaddr,
        pa: Paddr,
        size: usize,
        prot: VmProt,
        attr: MemAttr,
    ) -> PagingResult<usize> {
        if !size.is_page_aligned() {
            return Err(PagingError::InvalidAddress);
        }
        if va.checked_add(size).is_none() || pa.checked_add(size).is_none() {
            return Err(PagingError::InvalidAddress);
        }
        for off in (0..size).step_by(PAGE_SIZE) {
            self.map(va + off, pa + off, prot, attr)?;
        }
        Ok(size)
    }
}
