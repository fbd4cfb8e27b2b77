//! 同步原语
//!
//! 向其它模块提供基本的自旋锁。
//! 中断屏蔽由平台层负责，这里的锁只保证 CPU 之间的互斥。
mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::*;
pub use spin_lock::*;
