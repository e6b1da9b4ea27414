//! Fixture transport
//!
//! Serves canned JSON documents keyed by URL. Used by the test suites and for
//! replaying a captured dictionary without network access.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Transport;
use crate::error::{DictionaryError, DictionaryResult};

/// In-memory transport returning canned responses
#[derive(Debug, Default)]
pub struct FixtureTransport {
    responses: HashMap<String, DictionaryResult<serde_json::Value>>,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    /// Create an empty fixture transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `url`
    pub fn with_response(mut self, url: impl Into<String>, document: serde_json::Value) -> Self {
        self.responses.insert(url.into(), Ok(document));
        self
    }

    /// Fail every request for `url` with `error`
    pub fn with_failure(mut self, url: impl Into<String>, error: DictionaryError) -> Self {
        self.responses.insert(url.into(), Err(error));
        self
    }

    /// Replace the document served for `url`
    pub fn set_response(&mut self, url: impl Into<String>, document: serde_json::Value) {
        self.responses.insert(url.into(), Ok(document));
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|log| log.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn get_json(&self, url: &str) -> DictionaryResult<serde_json::Value> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(response) => response.clone(),
            None => Err(DictionaryError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
