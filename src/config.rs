use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Retry policy parameters (optional `[retry]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts, not counting the first try.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub base_delay_ms: u64,
    /// Multiplier applied per attempt (delay = factor^attempt * base).
    pub factor: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 300,
            factor: 3,
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Bulk transfer parameters (optional `[transfer]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Maximum number of file transfers in flight at once.
    pub max_parallel: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self { max_parallel: 8 }
    }
}

/// Condition-wait parameters (optional `[wait]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Total timeout budget in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            timeout_ms: 300_000,
        }
    }
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Top-level client configuration.
///
/// Plain values threaded through constructors; sections missing from a
/// parsed document fall back to built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the iModels API.
    pub base_url: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional transfer settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub transfer: Option<TransferConfig>,
    /// Optional condition-wait settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub wait: Option<WaitConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bentley.com/imodels".to_string(),
            retry: None,
            transfer: None,
            wait: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ClientConfig {
    /// Parses a TOML document into a config.
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    /// Parsed and validated base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    pub fn transfer_or_default(&self) -> TransferConfig {
        self.transfer.clone().unwrap_or_default()
    }

    pub fn wait_or_default(&self) -> WaitConfig {
        self.wait.clone().unwrap_or_default()
    }
}
