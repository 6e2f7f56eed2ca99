use crate::ollama::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::prompt::PromptFormat;
use crate::retry::{RetryPolicy, MAX_EXPONENTIAL_RETRIES};
use crate::transport::CurlOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (3 = up to 4 attempts).
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff (1.0 = waits of 1s, 2s, 4s).
    pub base_delay_secs: f64,
    /// Optional cap on a single backoff wait, in seconds.
    #[serde(default)]
    pub max_delay_secs: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_secs: 1.0,
            max_delay_secs: None,
        }
    }
}

/// Reject retry budgets past the point where exponential waits stop growing.
pub fn check_max_retries(max_retries: u32) -> Result<u32> {
    if max_retries > MAX_EXPONENTIAL_RETRIES {
        anyhow::bail!(
            "max_retries {} is too large (at most {})",
            max_retries,
            MAX_EXPONENTIAL_RETRIES
        );
    }
    Ok(max_retries)
}

impl RetryConfig {
    pub fn to_policy(&self) -> Result<RetryPolicy> {
        check_max_retries(self.max_retries)?;
        let base = Duration::try_from_secs_f64(self.base_delay_secs).with_context(|| {
            format!("invalid retry.base_delay_secs: {}", self.base_delay_secs)
        })?;
        let mut policy = RetryPolicy::new(self.max_retries, base);
        if let Some(max) = self.max_delay_secs {
            policy = policy.with_max_delay(Duration::from_secs(max));
        }
        Ok(policy)
    }
}

/// HTTP timeouts (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let opts = CurlOptions::default();
        Self {
            connect_timeout_secs: opts.connect_timeout.as_secs(),
            request_timeout_secs: opts.request_timeout.as_secs(),
        }
    }
}

/// Global configuration loaded from `~/.config/llamit/config.toml`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlamitConfig {
    /// Ollama generate endpoint.
    pub ollama_url: String,
    /// Model name passed to Ollama.
    pub model: String,
    /// Commit message format. Unknown names fall back to conventional.
    #[serde(deserialize_with = "format_or_default")]
    pub format: PromptFormat,
    /// Instructions used when `format = "custom"`.
    pub custom_template: Option<String>,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
    /// Optional HTTP timeouts; if missing, built-in defaults are used.
    pub http: Option<HttpConfig>,
}

/// Same leniency as the `--format` flag: case-insensitive, warn and use conventional.
fn format_or_default<'de, D>(deserializer: D) -> std::result::Result<PromptFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(PromptFormat::from_name_or_default(&name))
}

impl Default for LlamitConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            format: PromptFormat::default(),
            custom_template: None,
            retry: None,
            http: None,
        }
    }
}

impl LlamitConfig {
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    pub fn curl_options(&self) -> CurlOptions {
        let http = self.http.clone().unwrap_or_default();
        CurlOptions {
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            request_timeout: Duration::from_secs(http.request_timeout_secs),
        }
    }
}

/// Check that `endpoint` is an absolute http(s) URL with a host.
pub fn validate_endpoint(endpoint: &str) -> Result<url::Url> {
    let parsed =
        url::Url::parse(endpoint).with_context(|| format!("invalid Ollama URL {:?}", endpoint))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("unsupported scheme {:?} in Ollama URL {}", other, endpoint),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        anyhow::bail!("Ollama URL {} has no host", endpoint);
    }
    Ok(parsed)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("llamit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LlamitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LlamitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<LlamitConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: LlamitConfig =
        toml::from_str(&data).with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}
