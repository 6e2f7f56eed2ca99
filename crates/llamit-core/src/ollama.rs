//! Ollama `/api/generate` request building and response decoding.
//!
//! Builds the one payload the executor sends, and interprets the body of the
//! successful attempt. Decoding happens after execution and is never retried.

use crate::prompt::{self, PromptFormat};
use serde::{Deserialize, Serialize};

/// Default generate endpoint of a local Ollama.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// Default model.
pub const DEFAULT_MODEL: &str = "qwen3-coder:30b";

/// Request body for `/api/generate`. Streaming is always off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

/// Subset of the `/api/generate` response that we use.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Nothing was piped in; there is no diff to describe.
    #[error("input from stdin is empty")]
    EmptyInput,
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to decode Ollama response: {source}")]
pub struct DecodeError {
    #[from]
    source: serde_json::Error,
}

/// Build the JSON payload for one generation request.
///
/// Rejects empty input: the executor itself never inspects the payload.
pub fn build_payload(
    diff: &[u8],
    model: &str,
    format: PromptFormat,
    custom_template: Option<&str>,
) -> Result<Vec<u8>, BuildError> {
    if diff.is_empty() {
        tracing::warn!("input from stdin is empty, no diff provided");
        return Err(BuildError::EmptyInput);
    }
    let diff = String::from_utf8_lossy(diff);
    let request = GenerateRequest {
        model: model.to_string(),
        prompt: prompt::render(format, custom_template, &diff),
        stream: false,
    };
    let payload = serde_json::to_vec(&request)?;
    tracing::debug!(
        "prepared request: model={} format={} payload={} bytes",
        model,
        format,
        payload.len()
    );
    Ok(payload)
}

/// Extract the generated text from a successful response body.
pub fn decode_response(body: &[u8]) -> Result<String, DecodeError> {
    let parsed: GenerateResponse = serde_json::from_slice(body)?;
    Ok(parsed.response)
}
