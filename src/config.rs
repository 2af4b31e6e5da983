//! Runtime configuration for the dashboard
//!
//! Built from command-line arguments only; nothing is read from the
//! environment or from disk.

use crate::error::{Result, SparkmonError};
use std::time::Duration;

/// Default Spark UI address
pub const DEFAULT_HOST: &str = "http://localhost:4040";

/// Default refresh period
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(5);

/// Default per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashConfig {
    /// Base URL of the status API, without trailing slash
    pub host: String,

    /// Time between automatic refreshes
    pub refresh_interval: Duration,

    /// Upper bound for a single HTTP request; `None` waits forever
    pub request_timeout: Option<Duration>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            refresh_interval: DEFAULT_REFRESH,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl DashConfig {
    /// Build and validate a config.
    ///
    /// `request_timeout_secs == 0` disables the timeout.
    pub fn new(host: &str, refresh_secs: u64, request_timeout_secs: u64) -> Result<Self> {
        let host = normalize_host(host)?;

        if refresh_secs == 0 {
            return Err(SparkmonError::Config(
                "refresh interval must be at least 1 second".to_string(),
            ));
        }

        let request_timeout =
            (request_timeout_secs > 0).then(|| Duration::from_secs(request_timeout_secs));

        Ok(Self {
            host,
            refresh_interval: Duration::from_secs(refresh_secs),
            request_timeout,
        })
    }
}

fn normalize_host(host: &str) -> Result<String> {
    let trimmed = host.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SparkmonError::Config(format!(
            "host must start with http:// or https://, got '{}'",
            host
        )));
    }
    let authority = trimmed.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if authority.is_empty() {
        return Err(SparkmonError::Config(format!(
            "host '{}' has no address",
            host
        )));
    }
    Ok(trimmed.to_string())
}
