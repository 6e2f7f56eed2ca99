//! Generation flags and how they combine with the config file.

use anyhow::Result;
use clap::Args;
use llamit_core::config::{self, LlamitConfig};
use llamit_core::prompt::PromptFormat;
use llamit_core::retry::RetryPolicy;
use llamit_core::transport::CurlOptions;
use std::path::PathBuf;

/// Flags for the default (generate) command. Unset flags fall back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Ollama API URL.
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Ollama model to use.
    #[arg(long)]
    pub model: Option<String>,

    /// Commit message format (conventional, angular, gitmoji, karma, semantic, google, custom).
    #[arg(long)]
    pub format: Option<String>,

    /// Custom format template (only used when format is 'custom').
    #[arg(long, value_name = "TEMPLATE")]
    pub custom_template: Option<String>,

    /// Retries after the first attempt on transient failures.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Read configuration from this file instead of the XDG config path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Take the diff from git (staged, else working tree) instead of stdin.
    /// Implied when stdin is a terminal.
    #[arg(long)]
    pub from_git: bool,
}

/// Everything one generation run needs, after flags override the config.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub model: String,
    pub format: PromptFormat,
    pub custom_template: Option<String>,
    pub policy: RetryPolicy,
    pub curl: CurlOptions,
}

impl GenerateArgs {
    pub fn load_config(&self) -> Result<LlamitConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }

    pub fn resolve(&self, cfg: &LlamitConfig) -> Result<Settings> {
        let endpoint = self
            .ollama_url
            .clone()
            .unwrap_or_else(|| cfg.ollama_url.clone());
        config::validate_endpoint(&endpoint)?;

        let format = match &self.format {
            Some(name) => PromptFormat::from_name_or_default(name),
            None => cfg.format,
        };

        let mut policy = cfg.retry_policy()?;
        if let Some(n) = self.max_retries {
            policy.max_retries = config::check_max_retries(n)?;
        }

        Ok(Settings {
            endpoint,
            model: self.model.clone().unwrap_or_else(|| cfg.model.clone()),
            format,
            custom_template: self
                .custom_template
                .clone()
                .or_else(|| cfg.custom_template.clone()),
            policy,
            curl: cfg.curl_options(),
        })
    }
}
