//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Stdout carries the generated commit message, so logs never go there.

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,llamit=debug,llamit_core=debug";

/// Where log lines are written.
enum LogSink {
    File(fs::File),
    Stderr,
}

/// Per-event writer. A file handle that cannot be cloned degrades to stderr
/// for that event instead of dropping it.
enum SinkWriter {
    File(fs::File),
    Stderr,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::File(f) => f.write(buf),
            SinkWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::File(f) => f.flush(),
            SinkWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> SinkWriter {
        match self {
            LogSink::File(file) => file
                .try_clone()
                .map(SinkWriter::File)
                .unwrap_or(SinkWriter::Stderr),
            LogSink::Stderr => SinkWriter::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `sink`. Fails if one is already set.
fn install(sink: LogSink) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(sink)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

/// Path of the log file: `~/.local/state/llamit/llamit.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("llamit")?;
    Ok(xdg_dirs.get_state_home().join("llamit").join("llamit.log"))
}

/// Initialize structured logging to the XDG state log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    install(LogSink::File(file))?;
    tracing::info!("llamit logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = install(LogSink::Stderr);
}
