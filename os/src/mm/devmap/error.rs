//! 设备映射错误类型

use crate::mm::page_table::PagingError;
use core::fmt;

/// 设备映射操作的错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevMapError {
    // 静态设备表
    /// 静态设备表已安装
    AlreadyInstalled,
    /// 某一项的地址或大小未页对齐
    MisalignedEntry {
        /// 出错项在表中的下标
        index: usize,
    },
    /// 构建器已满
    TableFull {
        /// 可容纳的项数（不含结尾哨兵）
        capacity: usize,
    },

    // 参数
    /// 请求大小为 0
    EmptyRange,
    /// 地址加大小或页舍入越过地址空间上界
    AddressOverflow,

    // 动态映射
    /// 内核虚拟地址空间不足（致命）
    KvaExhausted {
        /// 按页舍入后的请求大小
        size: usize,
    },
    /// 解除映射的范围从未被映射
    NotMapped,
    /// 解除映射的大小与映射时不一致
    SizeMismatch,
    /// 动态映射器尚未注册
    MapperUninitialized,

    /// 页表协作者返回的错误
    Paging(PagingError),
}

impl DevMapError {
    /// 是否是不可恢复的错误
    ///
    /// 内核层面的策略是遇到致命错误即停机；本模块自身从不 panic。
    pub fn is_fatal(&self) -> bool {
        matches!(self, DevMapError::KvaExhausted { .. })
    }
}

impl fmt::Display for DevMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevMapError::AlreadyInstalled => write!(f, "static device map already installed"),
            DevMapError::MisalignedEntry { index } => {
                write!(f, "device map entry {} is not page aligned", index)
            }
            DevMapError::TableFull { capacity } => {
                write!(f, "device map table full ({} entries)", capacity)
            }
            DevMapError::EmptyRange => write!(f, "empty range"),
            DevMapError::AddressOverflow => write!(f, "address range overflows"),
            DevMapError::KvaExhausted { size } => {
                write!(f, "out of kernel virtual address space ({:#x} bytes)", size)
            }
            DevMapError::NotMapped => write!(f, "range is not a live device mapping"),
            DevMapError::SizeMismatch => write!(f, "size differs from the live device mapping"),
            DevMapError::MapperUninitialized => write!(f, "device mapper not initialized"),
            DevMapError::Paging(err) => write!(f, "paging: {}", err),
        }
    }
}

impl From<PagingError> for DevMapError {
    fn from(err: PagingError) -> Self {
        DevMapError::Paging(err)
    }
}

/// 设备映射操作的结果类型
pub type DevMapResult<T> = Result<T, DevMapError>;
