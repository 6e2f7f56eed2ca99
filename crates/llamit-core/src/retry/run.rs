//! Attempt loop: send, classify, release, wait, repeat until a terminal outcome.

use super::classify::{self, AttemptOutcome};
use super::error::ExecuteError;
use super::policy::{RetryDecision, RetryPolicy};
use super::sleep::{Sleeper, Slept, ThreadSleeper};
use crate::transport::{CurlTransport, Request, Response, Transport};

/// Successful terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// Body of the successful attempt, untouched.
    pub body: Vec<u8>,
    pub attempts: u32,
}

pub type ExecutionResult = Result<Completed, ExecuteError>;

/// Drives one logical request to a terminal outcome.
///
/// Strictly sequential: one attempt in flight at a time, and the only
/// suspension besides the network call is the backoff wait.
pub struct Executor<T, S> {
    transport: T,
    sleeper: S,
}

impl Executor<CurlTransport, ThreadSleeper> {
    /// Real network and real waits.
    pub fn with_curl(transport: CurlTransport, sleeper: ThreadSleeper) -> Self {
        Self::new(transport, sleeper)
    }
}

impl<T: Transport, S: Sleeper> Executor<T, S> {
    pub fn new(transport: T, sleeper: S) -> Self {
        Self { transport, sleeper }
    }

    /// Send `payload` to `endpoint` under `policy`.
    ///
    /// At most `policy.max_retries + 1` transmissions; none after a 4xx.
    pub fn execute(
        &mut self,
        endpoint: &str,
        payload: &[u8],
        policy: &RetryPolicy,
    ) -> ExecutionResult {
        let request = Request::json(endpoint, payload);
        let max_attempts = policy.max_attempts();
        let mut attempt = 0u32;
        loop {
            let attempts = attempt.saturating_add(1);
            tracing::info!(
                "sending request to {} (attempt {}/{}, {} bytes)",
                endpoint,
                attempts,
                max_attempts,
                payload.len()
            );

            let outcome = self.attempt(&request);
            let decision = policy.decide(attempt, &outcome);
            tracing::debug!(attempt = attempts, outcome = outcome.label(), "attempt classified");

            let last = match outcome {
                AttemptOutcome::Success(body) => {
                    tracing::info!("request succeeded after {} attempt(s)", attempts);
                    return Ok(Completed { body, attempts });
                }
                AttemptOutcome::PermanentFailure { status, body } => {
                    tracing::warn!("not retrying: client error (HTTP {})", status);
                    return Err(ExecuteError::ClientError {
                        status,
                        body,
                        attempts,
                    });
                }
                AttemptOutcome::TransientFailure(cause) => cause,
            };

            match decision {
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        "attempt {} failed: {}; retrying in {:?}",
                        attempts,
                        last,
                        delay
                    );
                    if self.sleeper.sleep(delay) == Slept::Cancelled {
                        tracing::warn!("retry wait cancelled after {} attempt(s)", attempts);
                        return Err(ExecuteError::Cancelled { attempts, last });
                    }
                    attempt += 1;
                }
                RetryDecision::Exhausted => {
                    tracing::error!("giving up after {} attempt(s): {}", attempts, last);
                    return Err(ExecuteError::RetryExhausted { attempts, last });
                }
                RetryDecision::NoRetry | RetryDecision::Finish => {
                    tracing::warn!("not retrying: policy refused {}", last);
                    return Err(ExecuteError::NotRetryable { attempts, last });
                }
            }
        }
    }

    /// One physical transmission. The response handle is dropped before this
    /// returns, on every path.
    fn attempt(&mut self, request: &Request<'_>) -> AttemptOutcome {
        match self.transport.send(request) {
            Err(e) => classify::classify_transport_error(e),
            Ok(mut response) => {
                let status = response.status();
                let body = response.read_body();
                drop(response);
                classify::classify_response(status, body)
            }
        }
    }
}

/// Send `payload` to `endpoint` over libcurl with blocking waits.
pub fn execute(endpoint: &str, payload: &[u8], policy: &RetryPolicy) -> ExecutionResult {
    Executor::with_curl(CurlTransport::default(), ThreadSleeper::new())
        .execute(endpoint, payload, policy)
}
