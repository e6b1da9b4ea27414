//! Transport abstraction
//!
//! Defines the Transport trait used by the dictionary, structure and element
//! catalogs, and its implementations:
//! - HttpTransport: HTTP GET via reqwest (default, `api-backend` feature)
//! - FixtureTransport: canned JSON documents keyed by URL (tests, offline replay)
//!
//! ## Security
//!
//! Short names are percent-encoded into a single path segment. Empty names and
//! dot segments (`.` and `..`) are refused since they would change the path.

use async_trait::async_trait;

use crate::error::{DictionaryError, DictionaryResult};

pub mod fixture;
#[cfg(feature = "api-backend")]
pub mod http;

pub use fixture::FixtureTransport;
#[cfg(feature = "api-backend")]
pub use http::HttpTransport;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("data-dictionary-sdk/", env!("CARGO_PKG_VERSION"));

/// Maximum allowed length for data structure short names
const MAX_SHORT_NAME_LENGTH: usize = 100;

/// Trait for transports
///
/// A transport performs a single `GET url` and returns the decoded JSON body.
/// It never retries; callers needing resilience wrap the transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a URL and decode the body as JSON
    async fn get_json(&self, url: &str) -> DictionaryResult<serde_json::Value>;
}

/// Validate a data structure short name for safe use in request paths.
///
/// Short names cannot be empty, exceed [`MAX_SHORT_NAME_LENGTH`], or be a dot
/// segment. Any other character is percent-encoded by [`structure_url`].
pub fn validate_short_name(short_name: &str) -> DictionaryResult<()> {
    if short_name.is_empty() {
        return Err(DictionaryError::InvalidShortName(
            "short name cannot be empty".to_string(),
        ));
    }

    if short_name.len() > MAX_SHORT_NAME_LENGTH {
        return Err(DictionaryError::InvalidShortName(format!(
            "{} (max {} characters)",
            short_name, MAX_SHORT_NAME_LENGTH
        )));
    }

    if short_name == "." || short_name == ".." {
        return Err(DictionaryError::InvalidShortName(format!(
            "{} (dot segments are not allowed)",
            short_name
        )));
    }

    Ok(())
}

/// URL of the structure catalog below a dictionary base URL
pub fn structures_url(base_url: &str) -> String {
    format!("{}/datastructure", base_url.trim_end_matches('/'))
}

/// URL of one structure's element document below a dictionary base URL
pub fn structure_url(base_url: &str, short_name: &str) -> DictionaryResult<String> {
    validate_short_name(short_name)?;
    Ok(format!(
        "{}/{}",
        structures_url(base_url),
        urlencoding::encode(short_name)
    ))
}
