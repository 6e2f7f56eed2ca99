use super::classify::AttemptOutcome;
use std::fmt;
use std::time::Duration;

/// Maps `(base_delay, attempt_index)` to the wait before the next attempt.
pub type BackoffFn = fn(Duration, u32) -> Duration;

/// Pure predicate consulted for transient outcomes only.
pub type RetryableFn = fn(&AttemptOutcome) -> bool;

/// Largest retry budget for which [`exponential`] waits keep strictly increasing.
pub const MAX_EXPONENTIAL_RETRIES: u32 = 32;

/// `base * 2^attempt`, saturating.
///
/// The factor saturates at `u32::MAX` from `attempt == 32` on, so waits past
/// [`MAX_EXPONENTIAL_RETRIES`] are all equal.
pub fn exponential(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

/// Same wait after every attempt.
pub fn constant(base: Duration, _attempt: u32) -> Duration {
    base
}

/// Decision returned by the retry policy after one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The outcome is terminal by itself (success or 4xx).
    Finish,
    /// The retry predicate rejected this transient failure.
    NoRetry,
    /// Transient failure, but the attempt budget is spent.
    Exhausted,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry policy. Immutable once handed to the executor.
///
/// The reference policy is 3 retries (4 attempts) with waits of 1s, 2s, 4s.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Base delay fed to `backoff_fn`.
    pub base_delay: Duration,
    /// Optional upper bound on any single wait.
    pub max_delay: Option<Duration>,
    pub backoff_fn: BackoffFn,
    pub is_retryable: RetryableFn,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: None,
            backoff_fn: exponential,
            is_retryable: AttemptOutcome::is_transient,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn with_backoff(mut self, backoff_fn: BackoffFn) -> Self {
        self.backoff_fn = backoff_fn;
        self
    }

    pub fn with_retryable(mut self, is_retryable: RetryableFn) -> Self {
        self.is_retryable = is_retryable;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait after the failed attempt with 0-based index `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let raw = (self.backoff_fn)(self.base_delay, attempt);
        match self.max_delay {
            Some(max) => raw.min(max),
            None => raw,
        }
    }

    /// Decide what follows the attempt with 0-based index `attempt`.
    ///
    /// Success and 4xx always finish, whatever the predicate says.
    pub fn decide(&self, attempt: u32, outcome: &AttemptOutcome) -> RetryDecision {
        if !outcome.is_transient() {
            return RetryDecision::Finish;
        }
        if !(self.is_retryable)(outcome) {
            return RetryDecision::NoRetry;
        }
        if attempt >= self.max_retries {
            return RetryDecision::Exhausted;
        }
        RetryDecision::RetryAfter(self.backoff(attempt))
    }
}
