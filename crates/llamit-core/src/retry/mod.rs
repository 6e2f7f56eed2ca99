//! Resilient request execution.
//!
//! Classification of attempt results (transport failures, 4xx, everything
//! else), the bounded exponential backoff policy, injectable waits, and the
//! attempt loop that ties them together.

mod classify;
mod error;
mod policy;
mod run;
mod sleep;

pub use classify::{
    classify_response, classify_status, classify_transport_error, AttemptOutcome, StatusClass,
    TransientCause, STATUS_OK,
};
pub use error::ExecuteError;
pub use policy::{
    constant, exponential, BackoffFn, RetryDecision, RetryPolicy, RetryableFn,
    MAX_EXPONENTIAL_RETRIES,
};
pub use run::{execute, Completed, ExecutionResult, Executor};
pub use sleep::{CancelToken, Sleeper, Slept, ThreadSleeper};
