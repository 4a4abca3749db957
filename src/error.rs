//! Error types for typeahead.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for typeahead operations.
#[derive(Error, Debug)]
pub enum TypeaheadError {
    /// Configuration errors (invalid config file, missing handlers, bad CLI values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Item data errors (unreadable file, non-object records, duplicate primary keys, etc.)
    #[error("Data error: {0}")]
    Data(String),

    /// Internal application errors (terminal failures, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TypeaheadError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a data error with the given message.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Data(_) => "Data Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using TypeaheadError.
pub type Result<T> = std::result::Result<T, TypeaheadError>;
