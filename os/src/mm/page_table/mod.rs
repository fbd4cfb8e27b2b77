//! 页表协作接口模块
//!
//! 本模块定义设备映射核心与页表之间的接口：逐页安装/移除设备映射，以及启动早期的整段映射。
//! 页表格式、TLB 刷新都由实现方负责，设备映射核心只决定哪段虚拟地址对应哪段物理地址。
//!
//! [`SoftPageTable`] 是一个纯软件实现，用于宿主测试和早期调试。
mod flags;
mod mapper;
mod soft_page_table;

pub use flags::*;
pub use mapper::*;
pub use soft_page_table::*;

/// 分页操作中可能发生的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    /// 虚拟地址未被映射
    NotMapped,
    /// 虚拟地址已被映射
    AlreadyMapped,
    /// 提供了无效的地址（未对齐或超出范围）
    InvalidAddress,
    /// 页表页分配失败
    OutOfMemory,
}

impl core::fmt::Display for PagingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            PagingError::NotMapped => "page not mapped",
            PagingError::AlreadyMapped => "page already mapped",
            PagingError::InvalidAddress => "invalid address",
            PagingError::OutOfMemory => "out of page-table memory",
        };
        f.write_str(msg)
    }
}

/// 分页操作的结果类型
pub type PagingResult<T> = Result<T, PagingError>;
