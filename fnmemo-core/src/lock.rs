//! Guards the engine state a `Memoized` wrapper owns.
//!
//! The original keeps a real `RLock()` only when `thread_safe=True`
//! and a no-op `DummyWithable()` otherwise, to skip synchronization
//! overhead entirely in the single-threaded case. A `parking_lot`
//! mutex's uncontended lock/unlock is cheap enough (a couple of
//! nanoseconds) that skipping it buys nothing meaningful in Rust,
//! while an actual no-op path would need unsafe interior mutability to
//! stay `Sync` for the macro's `static` wrappers. So `CacheLock` always
//! takes the real lock; `thread_safe` is kept purely as a reported
//! configuration value in `cache_info()`, not as a switch between two
//! code paths.
//!
//! The lock protects only the critical sections around a single engine
//! `get`/`insert` call — see `wrapper.rs`'s drop-and-recheck protocol,
//! which never holds this lock while the underlying user function runs.

use parking_lot::{Mutex, MutexGuard};

pub struct CacheLock<T> {
    thread_safe: bool,
    inner: Mutex<T>,
}

impl<T> CacheLock<T> {
    pub fn new(thread_safe: bool, value: T) -> Self {
        CacheLock {
            thread_safe,
            inner: Mutex::new(value),
        }
    }

    pub fn is_thread_safe(&self) -> bool {
        self.thread_safe
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    pub fn with_lock<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_lock_grants_mutable_access() {
        let lock = CacheLock::new(false, 0);
        lock.with_lock(|v| *v += 1);
        lock.with_lock(|v| *v += 1);
        assert_eq!(*lock.lock(), 2);
    }

    #[test]
    fn thread_safe_flag_is_reported_not_enforced_structurally() {
        let lock = CacheLock::new(true, ());
        assert!(lock.is_thread_safe());
        let lock = CacheLock::new(false, ());
        assert!(!lock.is_thread_safe());
    }
}
