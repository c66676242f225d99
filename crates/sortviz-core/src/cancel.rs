#![forbid(unsafe_code)]

//! Cooperative cancellation for background runs.
//!
//! A run holds a [`CancelToken`] and checks it at every step boundary. The
//! controller keeps the matching [`CancelTrigger`]. Sleeping between steps
//! is done on the token itself, so a cancel wakes the run immediately
//! instead of waiting out the step delay.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

type Shared = Arc<(Mutex<bool>, Condvar)>;

fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    // A panicking run cannot leave the flag half-written.
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read side of a cancellation flag, owned by the running engine.
#[derive(Clone, Debug)]
pub struct CancelToken {
    inner: Shared,
}

/// Write side of a cancellation flag, owned by the controller.
#[derive(Debug)]
pub struct CancelTrigger {
    inner: Shared,
}

impl CancelToken {
    /// Create a new (token, trigger) pair in the not-cancelled state.
    pub fn new() -> (Self, CancelTrigger) {
        let inner: Shared = Arc::new((Mutex::new(false), Condvar::new()));
        let token = Self {
            inner: inner.clone(),
        };
        (token, CancelTrigger { inner })
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        let (flag, _) = &*self.inner;
        *lock(flag)
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `true` if cancelled (before or during the wait), `false` if
    /// the full duration elapsed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let mut cancelled = lock(flag);
        if *cancelled {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(cancelled, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            cancelled = guard;
            if *cancelled {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            // Spurious wakeup.
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

impl CancelTrigger {
    /// Request cancellation and wake any sleeping waiter.
    pub fn cancel(&self) {
        let (flag, cvar) = &*self.inner;
        let mut cancelled = lock(flag);
        *cancelled = true;
        cvar.notify_all();
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        let (flag, _) = &*self.inner;
        *lock(flag)
    }
}
