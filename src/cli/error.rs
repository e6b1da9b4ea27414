//! Error type for CLI commands

use thiserror::Error;

use crate::error::DictionaryError;

/// Errors reported by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error from the data dictionary client
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// Failed to render or write output
    #[error("Output error: {0}")]
    OutputError(String),

    /// Some requested structures could not be fetched
    #[error("{failed} of {requested} data structure(s) could not be fetched")]
    PartialFailure { failed: usize, requested: usize },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::OutputError(err.to_string())
    }
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Dictionary(err) => err.user_message(),
            _ => self.to_string(),
        }
    }
}
