//! Integration test: the executor over real libcurl against a scripted local server.
//!
//! Uses millisecond backoff so the retry schedule runs fast while still
//! exercising the real transport and the real blocking waits.

mod common;

use common::scripted_server::{self, Reply};
use llamit_core::ollama;
use llamit_core::prompt::PromptFormat;
use llamit_core::retry::{
    ExecuteError, Executor, RetryPolicy, ThreadSleeper, TransientCause,
};
use llamit_core::transport::{CurlOptions, CurlTransport, TransportErrorKind};
use std::time::{Duration, Instant};

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

fn executor() -> Executor<CurlTransport, ThreadSleeper> {
    let opts = CurlOptions {
        connect_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(10),
    };
    Executor::with_curl(CurlTransport::new(opts), ThreadSleeper::new())
}

fn payload() -> Vec<u8> {
    ollama::build_payload(
        b"diff --git a/login.rs b/login.rs\n+fn login() {}\n",
        "qwen3-coder:30b",
        PromptFormat::Conventional,
        None,
    )
    .unwrap()
}

#[test]
fn success_on_first_attempt_decodes_message() {
    let server = scripted_server::start(vec![Reply::Status(
        200,
        r#"{"response":"feat: add login"}"#,
    )]);
    let payload = payload();

    let done = executor()
        .execute(&server.url, &payload, &fast_policy())
        .expect("execute");
    assert_eq!(done.attempts, 1);
    assert_eq!(ollama::decode_response(&done.body).unwrap(), "feat: add login");
    assert_eq!(server.requests(), vec![payload]);
}

#[test]
fn every_attempt_posts_json_without_expect_continue() {
    let server = scripted_server::start(vec![
        Reply::Status(503, "{}"),
        Reply::Status(200, r#"{"response":"ok"}"#),
    ]);
    let payload = payload();

    executor()
        .execute(&server.url, &payload, &fast_policy())
        .expect("execute");

    let seen = server.recorded();
    assert_eq!(seen.len(), 2);
    for request in &seen {
        assert!(request.head.starts_with("POST /api/generate "), "{}", request.head);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Expect"), None);
        assert_eq!(request.body, payload);
    }
}

#[test]
fn server_errors_then_success_resends_identical_payload() {
    let server = scripted_server::start(vec![
        Reply::Status(500, "{}"),
        Reply::Status(502, "{}"),
        Reply::Status(200, r#"{"response":"ok"}"#),
    ]);
    let payload = payload();

    let done = executor()
        .execute(&server.url, &payload, &fast_policy())
        .expect("execute");
    assert_eq!(done.attempts, 3);
    assert_eq!(ollama::decode_response(&done.body).unwrap(), "ok");

    let seen = server.requests();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|body| *body == payload));
}

#[test]
fn persistent_server_errors_exhaust_after_four_attempts() {
    let server = scripted_server::start(vec![Reply::Status(500, "overloaded"); 4]);
    let start = Instant::now();

    let err = executor()
        .execute(&server.url, &payload(), &fast_policy())
        .unwrap_err();
    assert!(err.is_exhausted(), "unexpected {:?}", err);
    assert_eq!(err.attempts(), 4);
    assert_eq!(err.last_cause().and_then(TransientCause::status), Some(500));
    assert!(err.to_string().contains("overloaded"));
    // 10ms + 20ms + 40ms of backoff.
    assert!(start.elapsed() >= Duration::from_millis(70));
    assert_eq!(server.requests().len(), 4);
}

#[test]
fn client_error_is_not_retried() {
    let server = scripted_server::start(vec![
        Reply::Status(400, r#"{"error":"invalid request"}"#),
        Reply::Status(200, r#"{"response":"never"}"#),
    ]);

    let err = executor()
        .execute(&server.url, &payload(), &fast_policy())
        .unwrap_err();
    match err {
        ExecuteError::ClientError {
            status,
            ref body,
            attempts,
        } => {
            assert_eq!(status, 400);
            assert_eq!(attempts, 1);
            assert_eq!(body.as_slice(), br#"{"error":"invalid request"}"#);
        }
        other => panic!("expected ClientError, got {:?}", other),
    }
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn connection_refused_exhausts_with_transport_cause() {
    let url = scripted_server::closed_port_url();

    let err = executor()
        .execute(&url, &payload(), &fast_policy())
        .unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 4);
    match err.last_cause() {
        Some(TransientCause::Transport(e)) => assert_eq!(e.kind, TransportErrorKind::Connect),
        other => panic!("expected transport cause, got {:?}", other),
    }
}

#[test]
fn truncated_body_is_retried() {
    let server = scripted_server::start(vec![
        Reply::Truncated {
            declared: 100,
            sent: r#"{"respo"#,
        },
        Reply::Status(200, r#"{"response":"fix: retry"}"#),
    ]);

    let done = executor()
        .execute(&server.url, &payload(), &fast_policy())
        .expect("execute");
    assert_eq!(done.attempts, 2);
    assert_eq!(ollama::decode_response(&done.body).unwrap(), "fix: retry");
}

#[test]
fn redirect_is_retried_not_followed() {
    let server = scripted_server::start(vec![
        Reply::Status(302, ""),
        Reply::Status(200, r#"{"response":"chore: bump"}"#),
    ]);

    let done = executor()
        .execute(&server.url, &payload(), &fast_policy())
        .expect("execute");
    assert_eq!(done.attempts, 2);
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn undecodable_success_body_is_a_decode_error() {
    let server = scripted_server::start(vec![Reply::Status(200, "not json")]);

    let done = executor()
        .execute(&server.url, &payload(), &fast_policy())
        .expect("execute");
    assert_eq!(done.attempts, 1);
    assert!(ollama::decode_response(&done.body).is_err());
    assert_eq!(server.requests().len(), 1);
}
