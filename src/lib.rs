//! Data Dictionary SDK - Client library for hierarchical data dictionaries
//!
//! Provides:
//! - A lazily populated catalog hierarchy: dictionary → structures → elements
//! - Notes parsing that turns `code=label;...` annotations into valuesets
//! - Transports for HTTP (reqwest) and in-memory fixtures
//! - Client configuration from TOML files and environment variables

pub mod config;
pub mod error;
pub mod models;
pub mod transport;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::ClientConfig;
pub use error::{DictionaryError, DictionaryResult};

// Re-export models
pub use models::{
    Catalog, DataDictionary, DataElement, DataStructure, ElementState, FetchReport, NotesMode,
    ParsedNotes, ValueCode, parse_notes, parse_notes_with,
};

// Re-export transports
pub use transport::{FixtureTransport, Transport};
#[cfg(feature = "api-backend")]
pub use transport::HttpTransport;
