//! libcurl-backed transport: one `Easy` handle per attempt.

use super::{Request, Response, Transport, TransportError, TransportErrorKind};
use curl::easy::{Easy, List};
use std::io;
use std::time::Duration;

/// Timeouts applied to every attempt.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Whole-request limit; generation on a cold model can be slow.
    pub request_timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

/// Response of one attempt. Owns the easy handle until dropped.
pub struct CurlResponse {
    _easy: Easy,
    status: u32,
    body: Option<io::Result<Vec<u8>>>,
}

impl Response for CurlResponse {
    fn status(&self) -> u32 {
        self.status
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        self.body.take().unwrap_or_else(|| {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "response body already taken",
            ))
        })
    }
}

impl Transport for CurlTransport {
    type Response = CurlResponse;

    fn send(&mut self, request: &Request<'_>) -> Result<CurlResponse, TransportError> {
        let mut easy = Easy::new();
        easy.url(request.endpoint)?;
        easy.post(true)?;
        // Copied into the handle: each attempt transmits its own copy.
        easy.post_fields_copy(request.body)?;
        // 3xx is classified, never followed.
        easy.follow_location(false)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.request_timeout)?;

        let mut list = List::new();
        list.append(&format!("Content-Type: {}", request.content_type))?;
        list.append("Expect:")?;
        easy.http_headers(list)?;

        let mut body = Vec::new();
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        // 0 means no status line was ever received.
        let status = easy.response_code()?;
        match performed {
            Ok(()) => Ok(CurlResponse {
                _easy: easy,
                status,
                body: Some(Ok(body)),
            }),
            Err(e) if status != 0 => {
                tracing::debug!("HTTP {} but transfer failed: {}", status, e);
                Ok(CurlResponse {
                    _easy: easy,
                    status,
                    body: Some(Err(io::Error::new(io::ErrorKind::Other, e))),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::new(classify_curl_error(&e), e.to_string())
    }
}

/// Classify a curl error for diagnostics. Every kind is retried.
fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return TransportErrorKind::Resolve;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connect;
    }
    TransportErrorKind::Other
}
