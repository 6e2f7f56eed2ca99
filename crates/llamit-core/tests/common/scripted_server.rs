//! Minimal HTTP/1.1 server that answers POSTs from a fixed script, for integration tests.
//!
//! Connections are handled one at a time, in order. Every request (head and
//! body) is recorded. Once the script runs out, every request gets 500.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What the server sends back for one request.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Full response with this status and body.
    Status(u16, &'static str),
    /// Status 200 declaring `declared` body bytes but sending only `sent`, then closing.
    Truncated { declared: usize, sent: &'static str },
}

/// One request as received: request line plus headers, and the body.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub head: String,
    pub body: Vec<u8>,
}

impl Recorded {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(n, _)| n.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
    }
}

pub struct ScriptedServer {
    /// Generate endpoint, e.g. "http://127.0.0.1:12345/api/generate".
    pub url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl ScriptedServer {
    /// Bodies of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.recorded().into_iter().map(|r| r.body).collect()
    }

    /// Every request received so far, in arrival order.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(replies: Vec<Reply>) -> ScriptedServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);
    thread::spawn(move || {
        let mut script = replies.into_iter();
        for stream in listener.incoming().flatten() {
            let reply = script
                .next()
                .unwrap_or(Reply::Status(500, "script exhausted"));
            if let Some(request) = handle(stream, reply) {
                sink.lock().unwrap().push(request);
            }
        }
    });
    ScriptedServer {
        url: format!("http://127.0.0.1:{}/api/generate", port),
        recorded,
    }
}

/// A port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/generate", port)
}

fn handle(mut stream: TcpStream, reply: Reply) -> Option<Recorded> {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let request = read_request(&mut stream)?;
    let response = match reply {
        Reply::Status(status, text) => format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            text.len(),
            text
        ),
        Reply::Truncated { declared, sent } => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            declared, sent
        ),
    };
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
    Some(request)
}

/// Reads headers and a Content-Length body.
fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };
    let head = std::str::from_utf8(&data[..header_end]).ok()?.to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    Some(Recorded {
        head,
        body: data[header_end..header_end + content_length].to_vec(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
