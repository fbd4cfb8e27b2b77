use super::KvaAllocator;
use crate::mm::address::{AddressRange, AlignOps, Vaddr, VaddrRange};
use crate::pr_err;
use crate::sync::SpinLock;
use alloc::vec;
use alloc::vec::Vec;

/// First-fit allocator over a fixed virtual window
///
/// The free list is kept sorted by address; adjacent free ranges are merged on
/// release.
pub struct KvaArena {
    window: VaddrRange,
    free: SpinLock<Vec<VaddrRange>>,
}

impl KvaArena {
    /// Creates an arena managing `window`, whose bounds must be page aligned.
    pub fn new(window: VaddrRange) -> Self {
        debug_assert!(window.start().is_page_aligned() && window.end().is_page_aligned());
        let free = if window.is_empty() {
            Vec::new()
        } else {
            vec![window]
        };
        Self {
            window,
            free: SpinLock::new(free),
        }
    }

    /// The managed window
    pub fn window(&self) -> VaddrRange {
        self.window
    }

    /// Total bytes currently free
    pub fn free_bytes(&self) -> usize {
        self.free.lock().iter().map(|r| r.len()).sum()
    }

    fn alloc(&self, size: usize) -> Option<Vaddr> {
        if size == 0 || !size.is_page_aligned() {
            return None;
        }
        let mut free = self.free.lock();
        let idx = free.iter().position(|r| r.len() >= size)?;
        let hole = free[idx];
        let base = hole.start();
        if hole.len() == size {
            free.remove(idx);
        } else {
            free[idx] = AddressRange::new(base + size, hole.end());
        }
        Some(base)
    }

    fn free(&self, va: Vaddr, size: usize) {
        let Some(range) = VaddrRange::from_start_len(va, size) else {
            pr_err!("kva: free of {:#x}+{:#x} overflows", va, size);
            return;
        };
        if !va.is_page_aligned() || !size.is_page_aligned() {
            pr_err!("kva: free of {:#x}+{:#x} is not page aligned", va, size);
            return;
        }
        if range.is_empty() || !self.window.contains_range(&range) {
            pr_err!("kva: free of {:#x}+{:#x} outside arena", va, size);
            return;
        }

        let mut free = self.free.lock();
        let idx = free.partition_point(|r| r.start() < range.start());
        let overlaps_prev = idx > 0 && free[idx - 1].overlaps(&range);
        let overlaps_next = idx < free.len() && free[idx].overlaps(&range);
        if overlaps_prev || overlaps_next {
            pr_err!("kva: double free of {:#x}+{:#x}", va, size);
            return;
        }

        free.insert(idx, range);
        // merge with the successor, then the predecessor
        if idx + 1 < free.len() && free[idx].end() == free[idx + 1].start() {
            let next = free.remove(idx + 1);
            free[idx] = AddressRange::new(free[idx].start(), next.end());
        }
        if idx > 0 && free[idx - 1].end() == free[idx].start() {
            let cur = free.remove(idx);
            free[idx - 1] = AddressRange::new(free[idx - 1].start(), cur.end());
        }
    }
}

impl KvaAllocator for KvaArena {
    fn kva_alloc(&self, size: usize) -> Option<Vaddr> {
        self.alloc(size)
    }

    fn kva_free(&self, va: Vaddr, size: usize) {
        self.free(va, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PAGE_SIZE;
    use crate::{kassert, test_case};

    fn arena(pages: usize) -> KvaArena {
        let start = Vaddr::new(0x8000_0000);
        KvaArena::new(AddressRange::new(start, start + pages * PAGE_SIZE))
    }

    test_case!(test_first_fit, {
        let kva = arena(8);
        let a = kva.kva_alloc(2 * PAGE_SIZE);
        let b = kva.kva_alloc(PAGE_SIZE);
        kassert!(a == Some(Vaddr::new(0x8000_0000)));
        kassert!(b == Some(Vaddr::new(0x8000_0000 + 2 * PAGE_SIZE)));
        kassert!(kva.free_bytes() == 5 * PAGE_SIZE);
    });

    test_case!(test_rejects_bad_sizes, {
        let kva = arena(2);
        kassert!(kva.kva_alloc(0).is_none());
        kassert!(kva.kva_alloc(PAGE_SIZE + 1).is_none());
        kassert!(kva.kva_alloc(3 * PAGE_SIZE).is_none());
        kassert!(kva.free_bytes() == 2 * PAGE_SIZE);
    });

    test_case!(test_free_coalesces, {
        let kva = arena(4);
        let a = kva.kva_alloc(PAGE_SIZE).unwrap_or_default();
        let b = kva.kva_alloc(PAGE_SIZE).unwrap_or_default();
        let c = kva.kva_alloc(2 * PAGE_SIZE).unwrap_or_default();
        kassert!(kva.free_bytes() == 0);

        kva.kva_free(b, PAGE_SIZE);
        kva.kva_free(a, PAGE_SIZE);
        kva.kva_free(c, 2 * PAGE_SIZE);
        kassert!(kva.free_bytes() == 4 * PAGE_SIZE);
        // whole window is one hole again
        kassert!(kva.kva_alloc(4 * PAGE_SIZE) == Some(Vaddr::new(0x8000_0000)));
    });

    test_case!(test_double_free_ignored, {
        let kva = arena(4);
        let a = kva.kva_alloc(PAGE_SIZE).unwrap_or_default();
        kva.kva_free(a, PAGE_SIZE);
        kva.kva_free(a, PAGE_SIZE);
        kassert!(kva.free_bytes() == 4 * PAGE_SIZE);

        kva.kva_free(Vaddr::new(0x1000), PAGE_SIZE);
        kassert!(kva.free_bytes() == 4 * PAGE_SIZE);
    });

    test_case!(test_misaligned_free_ignored, {
        let kva = arena(4);
        let a = kva.kva_alloc(PAGE_SIZE).unwrap_or_default();

        kva.kva_free(a + 0x10, PAGE_SIZE);
        kva.kva_free(a, PAGE_SIZE + 1);
        kva.kva_free(a, 0x800);
        kassert!(kva.free_bytes() == 3 * PAGE_SIZE);

        // 剩余空洞仍页对齐
        let b = kva.kva_alloc(PAGE_SIZE).unwrap_or_default();
        kassert!(b.is_page_aligned());
        kassert!(b == a + PAGE_SIZE);

        kva.kva_free(a, PAGE_SIZE);
        kva.kva_free(b, PAGE_SIZE);
        kassert!(kva.free_bytes() == 4 * PAGE_SIZE);
    });

    test_case!(test_kernel_window, {
        let window = super::super::KERNEL_KVA.window();
        kassert!(window.start() == Vaddr::new(crate::config::KVA_DEVICE_START));
        kassert!(window.end() == Vaddr::new(crate::config::KVA_DEVICE_END));
    });
}
