//! Raw spin lock for `lock_api` integration
//!
//! This module provides the raw half of [`SpinLock`](super::SpinLock): a test-and-set
//! lock implementing `lock_api::RawMutex`. The guard-returning API comes from
//! `lock_api::Mutex`.
//!
//! # Interrupt Safety
//!
//! The lock does not touch the interrupt state. Callers that may be re-entered
//! from an interrupt handler must mask interrupts themselves before locking.

use core::hint;
use core::sync::atomic::{AtomicBool, Ordering};

/// 自旋锁结构体，不可重入 (即不能嵌套调用 lock())。
#[derive(Debug)]
pub struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    /// 创建一个新的 RawSpinLock 实例。
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// 检查锁是否被占用 (仅用于调试/测试)
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // 先只读自旋，避免在竞争时反复写缓存行
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        RawSpinLock::is_locked(self)
    }
}
