// os/src/mm/devmap/tests/static_map.rs

use super::*;

fn installed() -> StaticDevMap {
    let map = StaticDevMap::new();
    let mut early = RecordingEarly::new();
    kassert!(map.install(&SAMPLE_TABLE, &mut early).is_ok());
    map
}

test_case!(test_lookup_before_install, {
    let map = StaticDevMap::new();
    kassert!(!map.is_installed());
    kassert!(map.ptov(Paddr::new(UART_PA), 4).is_none());
    kassert!(map.vtop(Vaddr::new(UART_VA), 4).is_none());
    kassert!(map.last_va().is_none());
    kassert!(map.entries().is_empty());
});

test_case!(test_install_maps_each_entry, {
    let map = StaticDevMap::new();
    let mut early = RecordingEarly::new();
    kassert!(map.install(&SAMPLE_TABLE, &mut early).is_ok());
    kassert!(map.is_installed());

    // 哨兵之后的项既不映射也不参与查找
    kassert!(early.calls.len() == 3);
    kassert!(map.entries().len() == 3);
    kassert!(
        early.calls[2]
            == (
                Vaddr::new(PLIC_VA),
                Paddr::new(PLIC_PA),
                0x40_0000,
                VmProt::RW,
                MemAttr::DeviceStronglyOrdered
            )
    );
    kassert!(map.ptov(Paddr::new(0x2000), 4).is_none());
});

test_case!(test_second_install_rejected, {
    let map = installed();
    static OTHER: [DevMapEntry; 1] = [DevMapEntry::device(
        Vaddr::new(0xffff_ffff_8000_0000),
        Paddr::new(0x2000_0000),
        PAGE_SIZE,
    )];
    let mut early = RecordingEarly::new();
    kassert!(map.install(&OTHER, &mut early) == Err(DevMapError::AlreadyInstalled));
    kassert!(early.calls.is_empty());
    // 原表保持不变
    kassert!(map.entries().len() == 3);
    kassert!(map.ptov(Paddr::new(0x2000_0000), 4).is_none());
});

test_case!(test_misaligned_entry_rejected_before_mapping, {
    static BAD: [DevMapEntry; 2] = [
        DevMapEntry::device(Vaddr::new(UART_VA), Paddr::new(UART_PA), PAGE_SIZE),
        DevMapEntry::device(Vaddr::new(GPIO_VA), Paddr::new(GPIO_PA + 0x10), PAGE_SIZE),
    ];
    let map = StaticDevMap::new();
    let mut early = RecordingEarly::new();
    kassert!(map.install(&BAD, &mut early) == Err(DevMapError::MisalignedEntry { index: 1 }));
    kassert!(early.calls.is_empty());
    kassert!(!map.is_installed());
    kassert!(map.ptov(Paddr::new(UART_PA), 4).is_none());
});

test_case!(test_failed_install_not_published, {
    let map = StaticDevMap::new();
    let mut early = RecordingEarly::failing_at(1);
    kassert!(
        map.install(&SAMPLE_TABLE, &mut early)
            == Err(DevMapError::Paging(PagingError::OutOfMemory))
    );
    kassert!(!map.is_installed());
    kassert!(map.ptov(Paddr::new(UART_PA), 4).is_none());

    // 失败的安装不占用写一次句柄
    let mut early = RecordingEarly::new();
    kassert!(map.install(&SAMPLE_TABLE, &mut early).is_ok());
    kassert!(map.ptov(Paddr::new(UART_PA), 4) == Some(Vaddr::new(UART_VA)));
});

test_case!(test_full_containment_only, {
    let map = installed();

    kassert!(map.ptov(Paddr::new(UART_PA + 0x10), 8) == Some(Vaddr::new(UART_VA + 0x10)));
    // 恰好占满整项
    kassert!(map.ptov(Paddr::new(UART_PA), 2 * PAGE_SIZE) == Some(Vaddr::new(UART_VA)));
    // 越过项尾一个字节
    kassert!(map.ptov(Paddr::new(UART_PA), 2 * PAGE_SIZE + 1).is_none());
    // 两个物理相邻的项合起来能覆盖，但单项都不能
    kassert!(map.ptov(Paddr::new(UART_PA + PAGE_SIZE), 2 * PAGE_SIZE).is_none());
    // 起点在项之前
    kassert!(map.ptov(Paddr::new(UART_PA - 4), 8).is_none());

    kassert!(map.vtop(Vaddr::new(GPIO_VA + 0x24), 4) == Some(Paddr::new(GPIO_PA + 0x24)));
    kassert!(map.vtop(Vaddr::new(GPIO_VA + PAGE_SIZE), 2 * PAGE_SIZE).is_none());
});

test_case!(test_overflowing_request_never_matches, {
    let map = installed();
    kassert!(map.ptov(Paddr::new(UART_PA), usize::MAX).is_none());
    kassert!(map.vtop(Vaddr::new(UART_VA), usize::MAX).is_none());
});

test_case!(test_round_trip, {
    let map = installed();
    for &(pa, size) in &[
        (UART_PA, 4),
        (UART_PA + 0x1ff0, 0x10),
        (PLIC_PA + 0x20_0004, 0x1000),
        (GPIO_PA, 2 * PAGE_SIZE),
    ] {
        let va = map.ptov(Paddr::new(pa), size);
        kassert!(va.is_some());
        if let Some(va) = va {
            kassert!(map.vtop(va, size) == Some(Paddr::new(pa)));
        }
    }
});

test_case!(test_first_match_wins, {
    static DUP: [DevMapEntry; 2] = [
        DevMapEntry::device(Vaddr::new(0xffff_ffff_a000_0000), Paddr::new(UART_PA), PAGE_SIZE),
        DevMapEntry::device(Vaddr::new(0xffff_ffff_b000_0000), Paddr::new(UART_PA), PAGE_SIZE),
    ];
    let map = StaticDevMap::new();
    kassert!(map.install(&DUP, &mut RecordingEarly::new()).is_ok());
    kassert!(map.ptov(Paddr::new(UART_PA), 4) == Some(Vaddr::new(0xffff_ffff_a000_0000)));
});

test_case!(test_last_va, {
    let map = installed();
    kassert!(map.last_va() == Some(Vaddr::new(PLIC_VA)));
});

test_case!(test_concurrent_lookups_agree, {
    let map: &'static StaticDevMap = leak(installed());
    let probes: Vec<(usize, usize)> = (0..64)
        .map(|i| (UART_PA + i * 0x80, 0x100))
        .chain((0..64).map(|i| (PLIC_PA + i * 0x1_0000, 0x40)))
        .collect();
    let expected: Vec<Option<Vaddr>> = probes
        .iter()
        .map(|&(pa, size)| map.ptov(Paddr::new(pa), size))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let probes = probes.clone();
            std::thread::spawn(move || {
                probes
                    .iter()
                    .map(|&(pa, size)| map.ptov(Paddr::new(pa), size))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let seen = handle.join();
        kassert!(seen.is_ok());
        if let Ok(seen) = seen {
            kassert!(seen == expected);
        }
    }
});

/// 每段映射之间让出 CPU，拉长安装窗口
struct YieldingEarly;

impl EarlyMapper for YieldingEarly {
    fn map_chunk(
        &mut self,
        _va: Vaddr,
        _pa: Paddr,
        size: usize,
        _prot: VmProt,
        _attr: MemAttr,
    ) -> PagingResult<usize> {
        for _ in 0..100 {
            std::thread::yield_now();
        }
        Ok(size)
    }
}

test_case!(test_lookups_during_install_see_all_or_nothing, {
    use core::sync::atomic::AtomicBool;

    let map: &'static StaticDevMap = leak(StaticDevMap::new());
    let done: &'static AtomicBool = leak(AtomicBool::new(false));
    let probes = [
        (Paddr::new(UART_PA + 0x10), Vaddr::new(UART_VA + 0x10)),
        (Paddr::new(GPIO_PA + 0x20), Vaddr::new(GPIO_VA + 0x20)),
        (Paddr::new(PLIC_PA + 0x30), Vaddr::new(PLIC_VA + 0x30)),
    ];

    // 返回违反“要么全无、要么整表可见”的观测次数
    let readers: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                let mut violations = 0;
                let mut published = false;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    for &(pa, va) in &probes {
                        match map.ptov(pa, 4) {
                            Some(seen) if seen == va => published = true,
                            None if !published => {}
                            _ => violations += 1,
                        }
                    }
                    if finished {
                        break;
                    }
                }
                (violations, published)
            })
        })
        .collect();

    let mut early = YieldingEarly;
    kassert!(map.install(&SAMPLE_TABLE, &mut early).is_ok());
    done.store(true, Ordering::Release);

    for reader in readers {
        let result = reader.join();
        kassert!(result.is_ok());
        if let Ok((violations, published)) = result {
            kassert!(violations == 0);
            kassert!(published);
        }
    }
});
