//! Backoff waits and user cancellation.
//!
//! The executor never sleeps directly; it asks a `Sleeper`, so tests can
//! substitute a recording fake and the CLI can abort a wait on ctrl-c.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often a cancellable wait checks its token.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Shared abort flag. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slept {
    Elapsed,
    Cancelled,
}

/// Suspends the calling flow between attempts.
pub trait Sleeper {
    fn sleep(&self, delay: Duration) -> Slept;
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, delay: Duration) -> Slept {
        (**self).sleep(delay)
    }
}

/// Blocks the current thread, optionally waking early on cancellation.
#[derive(Debug, Clone, Default)]
pub struct ThreadSleeper {
    cancel: Option<CancelToken>,
}

impl ThreadSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancellable(token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
        }
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) -> Slept {
        let Some(token) = &self.cancel else {
            std::thread::sleep(delay);
            return Slept::Elapsed;
        };
        let deadline = Instant::now().checked_add(delay);
        loop {
            if token.is_cancelled() {
                return Slept::Cancelled;
            }
            let remaining = match deadline {
                Some(d) => d.saturating_duration_since(Instant::now()),
                None => CANCEL_POLL,
            };
            if remaining.is_zero() {
                return Slept::Elapsed;
            }
            std::thread::sleep(remaining.min(CANCEL_POLL));
        }
    }
}
