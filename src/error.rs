//! Error types for data dictionary operations
//!
//! Every fetch on the dictionary, structure and element catalogs reports
//! failures through [`DictionaryError`]. Transport failures abort the fetch in
//! progress; schema errors are collected per record so sibling records still load.

use thiserror::Error;

/// Errors that can occur while reading a data dictionary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DictionaryError {
    /// Network failure before a response was received
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The request exceeded the configured timeout
    #[error("Request to {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    /// The server answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON or not the expected shape
    #[error("Invalid response from {url}: {message}")]
    Parse { url: String, message: String },

    /// A record is missing its identity field
    #[error("Record {index} from {endpoint} is missing required field '{field}'")]
    Schema {
        endpoint: String,
        index: usize,
        field: &'static str,
    },

    /// Lookup of a structure that is not in the catalog
    #[error("Data structure not found: {0}")]
    NotFound(String),

    /// Short name that cannot be used in a request path
    #[error("Invalid data structure short name: {0}")]
    InvalidShortName(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DictionaryError {
    fn from(err: std::io::Error) -> Self {
        DictionaryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DictionaryError {
    fn from(err: serde_json::Error) -> Self {
        DictionaryError::Parse {
            url: String::new(),
            message: err.to_string(),
        }
    }
}

/// Result type for data dictionary operations
pub type DictionaryResult<T> = Result<T, DictionaryError>;

impl DictionaryError {
    /// Build a parse error for a response that has the wrong JSON shape
    pub(crate) fn unexpected_shape(url: &str, expected: &str, found: &serde_json::Value) -> Self {
        DictionaryError::Parse {
            url: url.to_string(),
            message: format!("expected {}, found {}", expected, json_kind(found)),
        }
    }

    /// Check if the error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DictionaryError::Transport { .. }
                | DictionaryError::Timeout { .. }
                | DictionaryError::Status { .. }
        )
    }

    /// Check if the error is a per-record schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, DictionaryError::Schema { .. })
    }

    /// Check if the error is a catalog miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, DictionaryError::NotFound(_))
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            DictionaryError::Transport { url, message } => {
                format!(
                    "Failed to reach {url}: {message}\n\n\
                    Hints:\n\
                    - Check your network connection\n\
                    - Verify the dictionary URL (--url or DATADICTIONARY_URL)"
                )
            }
            DictionaryError::Timeout { url, seconds } => {
                format!(
                    "Request to {url} timed out after {seconds} seconds.\n\n\
                    Hint: Increase the timeout with --timeout"
                )
            }
            DictionaryError::Status { url, status: 404 } => {
                format!(
                    "{url} was not found (HTTP 404).\n\n\
                    Hint: Check the short name with --list"
                )
            }
            DictionaryError::NotFound(name) => {
                format!(
                    "Data structure '{name}' is not in the dictionary.\n\n\
                    Hint: Run with --list to see available short names"
                )
            }
            _ => self.to_string(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
