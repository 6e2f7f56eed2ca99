//! One physical HTTP POST per attempt.
//!
//! A `Transport` sends a request and hands back a `Response` handle owned by
//! that attempt. Dropping the handle releases it (connection, buffers), so the
//! executor can release it before waiting or returning.

mod libcurl;

pub use self::libcurl::{CurlOptions, CurlResponse, CurlTransport};

use std::fmt;
use std::io;

/// Content type sent with every payload.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single POST: target, content type and the bytes to send.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub endpoint: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
}

impl<'a> Request<'a> {
    pub fn json(endpoint: &'a str, body: &'a [u8]) -> Self {
        Self {
            endpoint,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }
}

/// Response obtained by one attempt.
pub trait Response {
    fn status(&self) -> u32;

    /// Take the response body. Fails if the body could not be received.
    fn read_body(&mut self) -> io::Result<Vec<u8>>;
}

pub trait Transport {
    type Response: Response;

    /// Transmit `request.body` in full. Each call is an independent
    /// transmission; nothing from a previous call is reused.
    fn send(&mut self, request: &Request<'_>) -> Result<Self::Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Response = T::Response;

    fn send(&mut self, request: &Request<'_>) -> Result<Self::Response, TransportError> {
        (**self).send(request)
    }
}

/// Broad class of a transport failure, for logs and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Resolve,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Resolve => "could not resolve host",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(s)
    }
}

/// No response was obtained.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
