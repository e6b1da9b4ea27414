//! HTTP transport
//!
//! Implements [`Transport`] with an async reqwest client. Every request carries
//! the configured timeout; there are no retries and no authentication headers.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::Transport;
use crate::config::ClientConfig;
use crate::error::{DictionaryError, DictionaryResult};

/// HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: reqwest::Client,
    /// Request timeout in seconds
    timeout_seconds: u64,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    /// * `timeout_seconds` - Per-request timeout
    /// * `user_agent` - Value of the `User-Agent` header
    pub fn new(timeout_seconds: u64, user_agent: &str) -> DictionaryResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| DictionaryError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_seconds,
        })
    }

    /// Create a transport from client configuration
    pub fn from_config(config: &ClientConfig) -> DictionaryResult<Self> {
        Self::new(config.timeout_seconds, &config.user_agent)
    }

    /// Get the request timeout in seconds
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn map_send_error(&self, url: &str, err: reqwest::Error) -> DictionaryError {
        if err.is_timeout() {
            DictionaryError::Timeout {
                url: url.to_string(),
                seconds: self.timeout_seconds,
            }
        } else {
            DictionaryError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> DictionaryResult<serde_json::Value> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        serde_json::from_slice(&body).map_err(|e| DictionaryError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
