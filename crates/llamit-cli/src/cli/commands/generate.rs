//! Default command: diff (stdin or git) → Ollama (with retries) → commit message on stdout.

use anyhow::{Context, Result};
use llamit_core::ollama;
use llamit_core::retry::{CancelToken, ExecutionResult, Executor, ThreadSleeper};
use llamit_core::transport::CurlTransport;
use std::io::{IsTerminal, Read, Write};
use std::time::Duration;

use crate::cli::args::Settings;
use crate::cli::git;
use crate::cli::GenerateArgs;

/// How long to wait for a cancelled request to stop on its own after ctrl-c.
const CANCEL_GRACE: Duration = Duration::from_millis(250);

pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let cfg = args.load_config()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let settings = args.resolve(&cfg)?;
    tracing::info!(
        "starting commit generation: url={} model={} format={}",
        settings.endpoint,
        settings.model,
        settings.format
    );

    let from_git = args.from_git || std::io::stdin().is_terminal();
    let diff = tokio::task::spawn_blocking(move || read_diff(from_git))
        .await
        .context("diff input task join")??;

    let payload = ollama::build_payload(
        &diff,
        &settings.model,
        settings.format,
        settings.custom_template.as_deref(),
    )?;

    let result = execute_cancellable(&settings, payload).await?;
    let completed = result
        .with_context(|| format!("error making request to Ollama at {}", settings.endpoint))?;
    tracing::info!(
        "successful response from Ollama after {} attempt(s)",
        completed.attempts
    );

    let message = ollama::decode_response(&completed.body)?;
    write_message(std::io::stdout().lock(), &message)?;
    tracing::info!("commit message written to stdout");
    Ok(())
}

/// Runs the executor on a blocking task. Ctrl-c cancels a pending backoff wait;
/// if the request does not stop within the grace period, bail out.
async fn execute_cancellable(settings: &Settings, payload: Vec<u8>) -> Result<ExecutionResult> {
    let cancel = CancelToken::new();
    let mut task = tokio::task::spawn_blocking({
        let endpoint = settings.endpoint.clone();
        let policy = settings.policy;
        let transport = CurlTransport::new(settings.curl);
        let sleeper = ThreadSleeper::cancellable(cancel.clone());
        move || Executor::with_curl(transport, sleeper).execute(&endpoint, &payload, &policy)
    });

    tokio::select! {
        joined = &mut task => joined.context("request task join"),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupt received, cancelling request");
            cancel.cancel();
            match tokio::time::timeout(CANCEL_GRACE, &mut task).await {
                Ok(joined) => joined.context("request task join"),
                Err(_) => anyhow::bail!("interrupted"),
            }
        }
    }
}

/// Diff from git when asked (or stdin is a terminal), otherwise from stdin.
fn read_diff(from_git: bool) -> Result<Vec<u8>> {
    if from_git {
        let (diff, source) = git::git_diff_cascade()?;
        tracing::info!("read {} bytes of git diff from {}", diff.len(), source);
        return Ok(diff);
    }
    let diff = read_input(std::io::stdin().lock())?;
    tracing::info!("read {} bytes of git diff from stdin", diff.len());
    Ok(diff)
}

/// Read the whole diff. Emptiness is checked when building the payload.
pub(crate) fn read_input<R: Read>(mut input: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .context("error reading from stdin")?;
    Ok(buf)
}

/// Write the message as-is, without a trailing newline.
pub(crate) fn write_message<W: Write>(mut out: W, message: &str) -> Result<()> {
    out.write_all(message.as_bytes())
        .and_then(|()| out.flush())
        .context("error writing to stdout")
}
