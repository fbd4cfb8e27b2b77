//! 设备内存映射模块
//!
//! 物理设备地址与内核虚拟地址之间的转换，分两部分：
//!
//! - [`StaticDevMap`]：启动时一次性安装的固定设备表，正反向查找都要求某一项完全包含请求范围
//! - [`DeviceMapper`]：按需把任意物理设备范围映射到新分配的内核虚拟地址
//!
//! 平台代码用 [`DevMapBuilder`] 组装静态表，再调用 [`devmap_bootstrap`] 安装。
//! 驱动通过 [`mapdev`]/[`unmapdev`] 访问设备内存：先查静态表，未命中才走动态映射。

mod builder;
mod entry;
mod error;
mod mapper;
mod registry;
mod table;

#[cfg(test)]
mod tests;

pub use builder::DevMapBuilder;
pub use entry::DevMapEntry;
pub use error::{DevMapError, DevMapResult};
pub use mapper::DeviceMapper;
pub use registry::LiveMapping;
pub use table::StaticDevMap;

use crate::mm::address::{Paddr, Vaddr};
use crate::mm::kva::{KERNEL_KVA, KvaAllocator};
use crate::mm::page_table::{DevicePageMapper, EarlyMapper};
use crate::{pr_err, pr_info};
use alloc::boxed::Box;
use once_cell::race::OnceBox;

/// 全局静态设备表
pub static DEVMAP: StaticDevMap = StaticDevMap::new();

static DEVICE_MAPPER: OnceBox<DeviceMapper<'static>> = OnceBox::new();

/// 安装全局静态设备表并打印
pub fn devmap_bootstrap<M: EarlyMapper + ?Sized>(
    table: &'static [DevMapEntry],
    early: &mut M,
) -> DevMapResult<()> {
    DEVMAP.install(table, early)?;
    DEVMAP.print_table();
    Ok(())
}

/// 在静态设备表中把物理地址范围转换为虚拟地址
pub fn devmap_ptov(pa: Paddr, size: usize) -> Option<Vaddr> {
    DEVMAP.ptov(pa, size)
}

/// 在静态设备表中把虚拟地址范围转换为物理地址
pub fn devmap_vtop(va: Vaddr, size: usize) -> Option<Paddr> {
    DEVMAP.vtop(va, size)
}

/// 静态映射区的最低虚拟地址，动态映射窗口应放在它之下
pub fn devmap_lastaddr() -> Option<Vaddr> {
    DEVMAP.last_va()
}

/// 注册全局动态映射器，使用内核设备窗口 [`KERNEL_KVA`]
pub fn init_device_mapper(pages: &'static dyn DevicePageMapper) -> DevMapResult<()> {
    init_device_mapper_with(pages, &*KERNEL_KVA)
}

/// 注册全局动态映射器（只能注册一次）
pub fn init_device_mapper_with(
    pages: &'static dyn DevicePageMapper,
    kva: &'static dyn KvaAllocator,
) -> DevMapResult<()> {
    DEVICE_MAPPER
        .set(Box::new(DeviceMapper::new(pages, kva)))
        .map_err(|_| DevMapError::AlreadyInstalled)?;
    pr_info!("devmap: dynamic device mapper ready");
    Ok(())
}

/// 全局动态映射器
pub fn device_mapper() -> DevMapResult<&'static DeviceMapper<'static>> {
    DEVICE_MAPPER.get().ok_or(DevMapError::MapperUninitialized)
}

/// 映射设备内存 `[pa, pa + size)`，返回对应的虚拟地址
///
/// 静态表中完全包含该范围时直接返回静态地址。
///
/// # Panics
///
/// 动态映射失败（包括虚拟地址空间耗尽）时停机。
pub fn mapdev(pa: Paddr, size: usize) -> Vaddr {
    if let Some(va) = DEVMAP.ptov(pa, size) {
        return va;
    }
    match device_mapper().and_then(|mapper| mapper.map_device(pa, size)) {
        Ok(va) => va,
        Err(err) => panic!("mapdev: cannot map pa {:#x} size {:#x}: {}", pa, size, err),
    }
}

/// 解除 [`mapdev`] 建立的映射
///
/// 静态表内的地址不做任何处理。调用方违约（范围未映射或大小不符）只记录错误，不拆除任何映射。
pub fn unmapdev(va: Vaddr, size: usize) {
    if DEVMAP.vtop(va, size).is_some() {
        return;
    }
    if let Err(err) = device_mapper().and_then(|mapper| mapper.unmap_device(va, size)) {
        pr_err!("unmapdev: va {:#x} size {:#x}: {}", va, size, err);
    }
}
