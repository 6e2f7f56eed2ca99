pub mod config;
pub mod logging;

pub mod ollama;
pub mod prompt;
pub mod retry;
pub mod transport;
