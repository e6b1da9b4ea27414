//! Client configuration
//!
//! Settings for connecting to a data dictionary: base URL, request timeout,
//! user agent and the notes parsing mode. Values layer as defaults, then a
//! TOML file, then environment variables, then explicit builder calls.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, DictionaryResult};
use crate::models::notes::NotesMode;
use crate::transport::DEFAULT_USER_AGENT;

/// Environment variable overriding the dictionary base URL
pub const ENV_BASE_URL: &str = "DATADICTIONARY_URL";

/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "DATADICTIONARY_TIMEOUT";

/// Configuration for a data dictionary client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the data dictionary API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How uncoded notes segments interact with coded ones
    #[serde(default)]
    pub notes_mode: NotesMode,
}

fn default_base_url() -> String {
    "https://nda.nih.gov/api/datadictionary/v2".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
            notes_mode: NotesMode::default(),
        }
    }
}

impl ClientConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> DictionaryResult<Self> {
        toml::from_str(content)
            .map_err(|e| DictionaryError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> DictionaryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DictionaryError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `DATADICTIONARY_URL` and `DATADICTIONARY_TIMEOUT` overrides
    pub fn apply_env(self) -> DictionaryResult<Self> {
        self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT).ok(),
        )
    }

    fn apply_overrides(
        mut self,
        base_url: Option<String>,
        timeout: Option<String>,
    ) -> DictionaryResult<Self> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = timeout {
            self.timeout_seconds = raw.trim().parse().map_err(|_| {
                DictionaryError::Config(format!(
                    "{} must be a number of seconds: {}",
                    ENV_TIMEOUT, raw
                ))
            })?;
        }
        Ok(self)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the notes parsing mode
    pub fn with_notes_mode(mut self, mode: NotesMode) -> Self {
        self.notes_mode = mode;
        self
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that the configuration can be used to build a client
    pub fn validate(&self) -> DictionaryResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(DictionaryError::Config("base_url cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DictionaryError::Config(format!(
                "base_url must start with http:// or https://: {}",
                url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(DictionaryError::Config(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://nda.nih.gov/api/datadictionary/v2");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.notes_mode, NotesMode::LastSegmentWins);
        assert!(config.user_agent.starts_with("data-dictionary-sdk/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_builders() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080/dd/")
            .with_timeout(5)
            .with_user_agent("tester")
            .with_notes_mode(NotesMode::CodedWins);

        assert_eq!(config.normalized_base_url(), "http://localhost:8080/dd");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.user_agent, "tester");
        assert_eq!(config.notes_mode, NotesMode::CodedWins);
    }

    #[test]
    fn test_client_config_partial_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "http://example.org/api"
            notes_mode = "coded_wins"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://example.org/api");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.notes_mode, NotesMode::CodedWins);
    }

    #[test]
    fn test_client_config_invalid_toml() {
        let result = ClientConfig::from_toml_str("timeout_seconds = \"soon\"");
        assert!(matches!(result, Err(DictionaryError::Config(_))));
    }

    #[test]
    fn test_client_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_seconds = 12").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_seconds, 12);
    }

    #[test]
    fn test_client_config_missing_file() {
        let result = ClientConfig::from_file("/nonexistent/datadictionary.toml");
        assert!(matches!(result, Err(DictionaryError::Config(_))));
    }

    #[test]
    fn test_client_config_overrides() {
        let config = ClientConfig::default()
            .apply_overrides(Some("http://override".to_string()), Some(" 7 ".to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://override");
        assert_eq!(config.timeout_seconds, 7);

        let config = ClientConfig::default()
            .apply_overrides(Some("  ".to_string()), None)
            .unwrap();
        assert_eq!(config.base_url, default_base_url());

        let result = ClientConfig::default().apply_overrides(None, Some("never".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config_validate() {
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_base_url("ftp://host")
                .validate()
                .is_err()
        );
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
    }
}
