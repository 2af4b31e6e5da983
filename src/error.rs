//! Error types for the Sparkmon dashboard
//!
//! Structured errors use thiserror; the binary wraps them with anyhow
//! context at the process boundary.

use thiserror::Error;

/// Main error type for Sparkmon operations
#[derive(Error, Debug)]
pub enum SparkmonError {
    /// Network failure talking to the status API
    #[error("Failed to GET {endpoint}: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Status API answered with a non-success HTTP status
    #[error("GET {endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// Response body was not the JSON we expected
    #[error("Failed to decode response for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A job references a stage id missing from its application's stage set
    #[error("Application {app_id} has no stage {stage_id}")]
    ResolutionGap { app_id: String, stage_id: i64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (terminal setup, drawing)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SparkmonError {
    /// Transport-level failure (connection, timeout, HTTP status)
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }

    /// Malformed or unexpected JSON
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type alias for Sparkmon operations
pub type Result<T> = std::result::Result<T, SparkmonError>;
