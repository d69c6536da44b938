//! Shared error types for terpmap.
//!
//! Data-quality problems in a catalog (a missing category, an unknown effect,
//! a stale filter selection) are never errors: they resolve to documented
//! fallbacks. The variants here cover caller bugs (an unparseable sort key or
//! combination mode) and I/O at the edges (catalog and config files).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for terpmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Requested sort key is not one of name, aroma, effects, category
    #[error("Invalid sort key '{0}' (expected one of: name, aroma, effects, category)")]
    InvalidSortKey(String),

    /// Requested sort direction is not ascending or descending
    #[error("Invalid sort direction '{0}' (expected ascending or descending)")]
    InvalidSortDirection(String),

    /// Requested effect combination mode is not AND or OR
    #[error("Invalid effect combination mode '{0}' (expected 'and' or 'or')")]
    InvalidCombinationMode(String),

    /// Category name in a filter request is not a known tier
    #[error("Invalid category '{0}' (expected Core, Secondary, Minor or Uncategorized)")]
    InvalidCategory(String),

    /// File system related errors
    #[error("File system error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document could not be parsed
    #[error("Failed to parse catalog: {source}")]
    Catalog {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create an I/O error with path context.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Whether the error stems from a caller passing an invalid value
    /// rather than from the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSortKey(_)
                | Error::InvalidSortDirection(_)
                | Error::InvalidCombinationMode(_)
                | Error::InvalidCategory(_)
        )
    }
}

/// Result type alias for terpmap operations
pub type Result<T> = std::result::Result<T, Error>;
