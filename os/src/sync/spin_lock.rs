use super::RawSpinLock;

/// 基于 [`RawSpinLock`] 的互斥锁，`lock()` 返回 RAII 保护器，离开作用域时自动释放。
///
/// 使用示例：
/// ```ignore
/// let lock = SpinLock::new(0usize);
/// {
///   let mut guard = lock.lock();
///   *guard += 1;
/// } // 离开作用域，自动释放锁
/// ```
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;

/// [`SpinLock`] 的 RAII 保护器
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
