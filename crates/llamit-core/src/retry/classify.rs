//! Classify raw attempt results into retry outcomes.
//!
//! Everything here is a pure function of the status code, the body read
//! result, or the transport error. No I/O happens in this module.

use crate::transport::TransportError;
use std::io;

/// The only status accepted as success.
pub const STATUS_OK: u32 = 200;

/// Longest body excerpt rendered into error messages.
const BODY_SNIPPET_MAX: usize = 512;

/// Retry class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Exactly 200.
    Success,
    /// 4xx: the request was rejected and retrying cannot fix it.
    Permanent,
    /// Everything else, including 1xx, 3xx, other 2xx and 5xx.
    Transient,
}

/// Why an attempt failed in a way the policy may retry.
#[derive(Debug, thiserror::Error)]
pub enum TransientCause {
    /// No response was obtained (DNS, connect, timeout).
    #[error("{0}")]
    Transport(TransportError),
    /// Response obtained with a status that is neither 200 nor 4xx.
    #[error("HTTP {status}: {}", body_snippet(.body))]
    Server { status: u32, body: Vec<u8> },
    /// Status 200 but the body could not be read to completion.
    #[error("HTTP {status}: failed to read response body: {error}")]
    BodyRead { status: u32, error: io::Error },
}

impl TransientCause {
    /// Status code of the response, if one was obtained.
    pub fn status(&self) -> Option<u32> {
        match self {
            TransientCause::Transport(_) => None,
            TransientCause::Server { status, .. } | TransientCause::BodyRead { status, .. } => {
                Some(*status)
            }
        }
    }
}

/// Classified result of one physical attempt. Never mutated after creation.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(Vec<u8>),
    TransientFailure(TransientCause),
    PermanentFailure { status: u32, body: Vec<u8> },
}

impl AttemptOutcome {
    pub fn is_transient(&self) -> bool {
        matches!(self, AttemptOutcome::TransientFailure(_))
    }

    /// Short label for log events.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::TransientFailure(_) => "transient",
            AttemptOutcome::PermanentFailure { .. } => "permanent",
        }
    }
}

/// Classify an HTTP status code for retry decisions.
pub fn classify_status(code: u32) -> StatusClass {
    match code {
        STATUS_OK => StatusClass::Success,
        400..=499 => StatusClass::Permanent,
        _ => StatusClass::Transient,
    }
}

/// Classify a response that was obtained: its status and the result of
/// reading its body.
///
/// A body read failure on a 200 is transient. On error statuses the body is
/// only diagnostic, so a failed read leaves the status to decide and the body
/// empty.
pub fn classify_response(status: u32, body: io::Result<Vec<u8>>) -> AttemptOutcome {
    match (classify_status(status), body) {
        (StatusClass::Success, Ok(body)) => AttemptOutcome::Success(body),
        (StatusClass::Success, Err(error)) => {
            AttemptOutcome::TransientFailure(TransientCause::BodyRead { status, error })
        }
        (StatusClass::Permanent, body) => AttemptOutcome::PermanentFailure {
            status,
            body: body.unwrap_or_default(),
        },
        (StatusClass::Transient, body) => AttemptOutcome::TransientFailure(TransientCause::Server {
            status,
            body: body.unwrap_or_default(),
        }),
    }
}

/// Classify an attempt that produced no response at all.
pub fn classify_transport_error(error: TransportError) -> AttemptOutcome {
    AttemptOutcome::TransientFailure(TransientCause::Transport(error))
}

/// Lossy, length-capped rendering of a response body for messages and logs.
pub(crate) fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() <= BODY_SNIPPET_MAX {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(BODY_SNIPPET_MAX).collect();
    cut.push_str("...");
    cut
}
