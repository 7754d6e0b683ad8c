//! # Synchronization Utilities
//!
//! Every bar guards its options, progress counter and output stream with a
//! single [`Mutex`]. A thread that panics while rendering (for example inside
//! a user-supplied writer) poisons that mutex. For a progress indicator,
//! continuing to draw is more useful than propagating the panic into every
//! worker thread that later calls `tick()`, so all lock acquisitions go
//! through [`lock_recover`].
//!
//! The recovered state may reflect a half-finished render pass. The next
//! render rewrites the whole line, so the worst case is one garbled frame.
//!
//! ```rust
//! use std::sync::Mutex;
//! use block_progress::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering from poison if necessary.
///
/// A warning is logged through the `log` facade when poison is recovered.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        log::warn!("recovered poisoned progress bar lock");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_recover_normal_operation() {
        let mutex = Mutex::new(42);
        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_lock_recover_after_poison() {
        let mutex = Mutex::new(42);

        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("intentional panic to poison mutex");
        }));
        assert!(mutex.lock().is_err(), "Mutex should be poisoned");

        let guard = lock_recover(&mutex);
        assert_eq!(*guard, 42);
    }

    #[test]
    fn test_concurrent_access_after_poison() {
        let mutex = Arc::new(Mutex::new(0));

        {
            let m = Arc::clone(&mutex);
            let _ = panic::catch_unwind(AssertUnwindSafe(move || {
                let _guard = m.lock().unwrap();
                panic!("poison it");
            }));
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&mutex);
                thread::spawn(move || {
                    *lock_recover(&m) += 1;
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(*lock_recover(&mutex), 4);
    }
}
