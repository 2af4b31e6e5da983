//! Client for the Spark monitoring REST API
//!
//! Read-only access to the three collections the dashboard joins:
//! applications, and per application its jobs and its stages.

use crate::error::{Result, SparkmonError};
use crate::types::{Application, Job, Stage};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Source of application, job and stage records.
///
/// Every call is a fresh read; implementations do not cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Applications known to the host, in the order the host reports them
    async fn applications(&self) -> Result<Vec<Application>>;

    /// Jobs of one application, unsorted
    async fn jobs(&self, app_id: &str) -> Result<Vec<Job>>;

    /// Stages of one application, unsorted
    async fn stages(&self, app_id: &str) -> Result<Vec<Stage>>;
}

/// [`StatusSource`] backed by HTTP GETs against a Spark UI
pub struct HttpStatusSource {
    host: String,
    client: reqwest::Client,
}

impl HttpStatusSource {
    /// Create a source for `host` (e.g. `http://localhost:4040`).
    ///
    /// `timeout` bounds each request; `None` lets a hung host block forever.
    pub fn new(host: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| SparkmonError::Fetch {
            endpoint: "<client>".to_string(),
            source,
        })?;

        Ok(Self {
            host: host.into(),
            client,
        })
    }

    /// Base URL this source reads from
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.host, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SparkmonError::Fetch {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SparkmonError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| SparkmonError::Fetch {
            endpoint: endpoint.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| SparkmonError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn applications(&self) -> Result<Vec<Application>> {
        self.get_json("/api/v1/applications").await
    }

    async fn jobs(&self, app_id: &str) -> Result<Vec<Job>> {
        self.get_json(&format!("/api/v1/applications/{}/jobs", app_id))
            .await
    }

    async fn stages(&self, app_id: &str) -> Result<Vec<Stage>> {
        self.get_json(&format!("/api/v1/applications/{}/stages", app_id))
            .await
    }
}
