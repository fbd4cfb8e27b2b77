//! Dynamic device mapper
//!
//! Maps arbitrary physical device ranges into freshly reserved kernel virtual
//! space, one page at a time, and tears them down again on request.

use super::registry::MappingRegistry;
use super::{DevMapError, DevMapResult, LiveMapping};
use crate::mm::address::{
    PageNum, Paddr, PpnRange, Vaddr, VaddrRange, Vpn, VpnRange, page_span,
};
use crate::mm::kva::KvaAllocator;
use crate::mm::page_table::{DevicePageMapper, MemAttr, PagingError};
use crate::{pr_debug, pr_err, pr_warn};
use alloc::vec::Vec;

/// Maps physical device ranges into kernel virtual space on demand
pub struct DeviceMapper<'a> {
    pages: &'a dyn DevicePageMapper,
    kva: &'a dyn KvaAllocator,
    registry: Option<MappingRegistry>,
}

impl<'a> DeviceMapper<'a> {
    /// Live-mapping tracking is enabled in debug builds.
    pub fn new(pages: &'a dyn DevicePageMapper, kva: &'a dyn KvaAllocator) -> Self {
        Self::with_tracking(pages, kva, cfg!(debug_assertions))
    }

    /// Like [`new`](Self::new) with tracking chosen explicitly
    pub fn with_tracking(
        pages: &'a dyn DevicePageMapper,
        kva: &'a dyn KvaAllocator,
        tracking: bool,
    ) -> Self {
        Self {
            pages,
            kva,
            registry: tracking.then(MappingRegistry::new),
        }
    }

    /// Whether live mappings are recorded and checked on unmap
    pub fn is_tracking(&self) -> bool {
        self.registry.is_some()
    }

    /// Maps `[pa, pa + size)` as device memory.
    ///
    /// Returns the virtual address corresponding to `pa`; the sub-page offset
    /// of `pa` is preserved.
    #[must_use = "the mapping must be released with unmap_device"]
    pub fn map_device(&self, pa: Paddr, size: usize) -> DevMapResult<Vaddr> {
        self.map_device_attr(pa, size, MemAttr::Device)
    }

    /// Like [`map_device`](Self::map_device) with an explicit memory type.
    #[must_use = "the mapping must be released with unmap_device"]
    pub fn map_device_attr(&self, pa: Paddr, size: usize, attr: MemAttr) -> DevMapResult<Vaddr> {
        if size == 0 {
            return Err(DevMapError::EmptyRange);
        }
        let (pspan, offset) = page_span(pa, size).ok_or(DevMapError::AddressOverflow)?;
        let len = pspan.len();

        let base = self
            .kva
            .kva_alloc(len)
            .ok_or(DevMapError::KvaExhausted { size: len })?;
        let Some(vspan) = VaddrRange::from_start_len(base, len) else {
            self.kva.kva_free(base, len);
            return Err(DevMapError::AddressOverflow);
        };

        let mut installed = 0;
        for (vpn, ppn) in VpnRange::covering(&vspan).zip(PpnRange::covering(&pspan)) {
            if let Err(err) = self.pages.kenter(vpn.start_addr(), ppn.start_addr(), attr) {
                pr_err!(
                    "mapdev: kenter va {:#x} -> pa {:#x} failed: {}",
                    vpn.start_addr(),
                    ppn.start_addr(),
                    err
                );
                self.remove_pages(VpnRange::covering(&vspan).take(installed));
                self.kva.kva_free(base, len);
                return Err(err.into());
            }
            installed += 1;
        }

        if let Some(registry) = &self.registry {
            registry.insert(
                base,
                LiveMapping {
                    pa: pspan.start(),
                    size: len,
                    attr,
                },
            );
        }
        pr_debug!(
            "mapdev: pa {:#x} size {:#x} -> va {:#x} ({} pages)",
            pa,
            size,
            base + offset,
            installed
        );
        Ok(base + offset)
    }

    /// Tears down a mapping made by [`map_device`](Self::map_device).
    ///
    /// `va` and `size` must describe the same byte range the mapping was made
    /// for. With tracking on, an unknown or differently sized range is rejected
    /// and nothing is removed. Otherwise every page is removed and the range is
    /// released even if a removal fails; the first failure is reported.
    pub fn unmap_device(&self, va: Vaddr, size: usize) -> DevMapResult<()> {
        if size == 0 {
            return Err(DevMapError::EmptyRange);
        }
        let (vspan, _) = page_span(va, size).ok_or(DevMapError::AddressOverflow)?;
        if let Some(registry) = &self.registry {
            registry.take(vspan.start(), vspan.len())?;
        }

        let first_err = self.remove_pages(VpnRange::covering(&vspan));
        self.kva.kva_free(vspan.start(), vspan.len());
        pr_debug!("unmapdev: va {:#x} size {:#x}", va, size);
        match first_err {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Number of live mappings, if tracking is on
    pub fn live_count(&self) -> Option<usize> {
        self.registry.as_ref().map(MappingRegistry::len)
    }

    /// Live mappings sorted by virtual base, if tracking is on
    pub fn live_mappings(&self) -> Option<Vec<(Vaddr, LiveMapping)>> {
        self.registry.as_ref().map(MappingRegistry::snapshot)
    }

    fn remove_pages(&self, pages: impl Iterator<Item = Vpn>) -> Option<PagingError> {
        let mut first_err = None;
        for vpn in pages {
            if let Err(err) = self.pages.kremove(vpn.start_addr()) {
                pr_warn!("unmapdev: kremove va {:#x} failed: {}", vpn.start_addr(), err);
                first_err.get_or_insert(err);
            }
        }
        first_err
    }
}
