//! Terminal errors of the request executor.

use super::classify::{body_snippet, TransientCause};

/// Why the executor stopped without a successful response.
///
/// Every variant carries the number of physical attempts made so callers can
/// report it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The server rejected the request with a 4xx status. Never retried.
    #[error("request rejected with HTTP {status} after {attempts} attempt(s): {}", body_snippet(.body))]
    ClientError {
        status: u32,
        body: Vec<u8>,
        attempts: u32,
    },
    /// Every attempt in the budget failed transiently.
    #[error("giving up after {attempts} attempt(s): {last}")]
    RetryExhausted { attempts: u32, last: TransientCause },
    /// The policy's retry predicate refused a transient failure.
    #[error("not retrying after {attempts} attempt(s): {last}")]
    NotRetryable { attempts: u32, last: TransientCause },
    /// Cancelled by the user while waiting to retry.
    #[error("cancelled after {attempts} attempt(s); last failure: {last}")]
    Cancelled { attempts: u32, last: TransientCause },
}

impl ExecuteError {
    /// Number of physical transmissions made before stopping.
    pub fn attempts(&self) -> u32 {
        match self {
            ExecuteError::ClientError { attempts, .. }
            | ExecuteError::RetryExhausted { attempts, .. }
            | ExecuteError::NotRetryable { attempts, .. }
            | ExecuteError::Cancelled { attempts, .. } => *attempts,
        }
    }

    /// Last transient cause, if the executor stopped on a transient failure.
    pub fn last_cause(&self) -> Option<&TransientCause> {
        match self {
            ExecuteError::ClientError { .. } => None,
            ExecuteError::RetryExhausted { last, .. }
            | ExecuteError::NotRetryable { last, .. }
            | ExecuteError::Cancelled { last, .. } => Some(last),
        }
    }

    /// True when the stop came from a classification (4xx or predicate),
    /// not from running out of budget or cancellation.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ExecuteError::ClientError { .. } | ExecuteError::NotRetryable { .. }
        )
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ExecuteError::RetryExhausted { .. })
    }
}
