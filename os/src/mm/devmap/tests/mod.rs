// os/src/mm/devmap/tests/mod.rs

use super::*;
use crate::config::PAGE_SIZE;
use crate::mm::address::{AddressRange, Paddr, Vaddr};
use crate::mm::kva::KvaArena;
use crate::mm::page_table::{
    DevicePageMapper, EarlyMapper, MemAttr, PagingError, PagingResult, SoftPageTable, VmProt,
};
use crate::{kassert, test_case};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

// ========== 测试辅助 ==========

const UART_PA: usize = 0x1000_0000;
const UART_VA: usize = 0xffff_ffff_bfff_e000;
const GPIO_PA: usize = 0x1000_2000;
const GPIO_VA: usize = 0xffff_ffff_bff0_0000;
const PLIC_PA: usize = 0x0c00_0000;
const PLIC_VA: usize = 0xffff_ffff_bf00_0000;

/// UART 与 GPIO 物理上相邻、虚拟上不相邻；表中间带一个哨兵后的垃圾项
static SAMPLE_TABLE: [DevMapEntry; 5] = [
    DevMapEntry::device(Vaddr::new(UART_VA), Paddr::new(UART_PA), 2 * PAGE_SIZE),
    DevMapEntry::device(Vaddr::new(GPIO_VA), Paddr::new(GPIO_PA), 2 * PAGE_SIZE),
    DevMapEntry::new(
        Vaddr::new(PLIC_VA),
        Paddr::new(PLIC_PA),
        0x40_0000,
        VmProt::RW,
        MemAttr::DeviceStronglyOrdered,
    ),
    DevMapEntry::SENTINEL,
    DevMapEntry::device(Vaddr::new(0x1000), Paddr::new(0x2000), PAGE_SIZE),
];

fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// 一个窗口为 `pages` 页的 KVA 分配器
fn small_kva(pages: usize) -> KvaArena {
    let start = Vaddr::new(0xffff_ffd0_0000_0000);
    KvaArena::new(AddressRange::new(start, start + pages * PAGE_SIZE))
}

/// 记录每次整段映射调用，可在第 `fail_at` 次调用时失败
struct RecordingEarly {
    calls: Vec<(Vaddr, Paddr, usize, VmProt, MemAttr)>,
    fail_at: Option<usize>,
}

impl RecordingEarly {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_at: None,
        }
    }

    fn failing_at(index: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some(index),
        }
    }
}

impl EarlyMapper for RecordingEarly {
    fn map_chunk(
        &mut self,
        va: Vaddr,
        pa: Paddr,
        size: usize,
        prot: VmProt,
        attr: MemAttr,
    ) -> PagingResult<usize> {
        if self.fail_at == Some(self.calls.len()) {
            return Err(PagingError::OutOfMemory);
        }
        self.calls.push((va, pa, size, prot, attr));
        Ok(size)
    }
}

/// 前 `budget` 次 kenter 成功，之后全部失败
struct FlakyPages {
    inner: SoftPageTable,
    budget: AtomicUsize,
}

impl FlakyPages {
    fn new(budget: usize) -> Self {
        Self {
            inner: SoftPageTable::new(),
            budget: AtomicUsize::new(budget),
        }
    }
}

impl DevicePageMapper for FlakyPages {
    fn kenter(&self, va: Vaddr, pa: Paddr, attr: MemAttr) -> PagingResult<()> {
        let granted = self
            .budget
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| left.checked_sub(1))
            .is_ok();
        if !granted {
            return Err(PagingError::OutOfMemory);
        }
        self.inner.kenter(va, pa, attr)
    }

    fn kremove(&self, va: Vaddr) -> PagingResult<()> {
        self.inner.kremove(va)
    }
}

mod static_map;
