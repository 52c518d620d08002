//! Custom error types for Dwell
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Dwell operations
#[derive(Error, Debug)]
pub enum DwellError {
    /// Browser launch, navigation, or CDP errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// Search page scraping errors
    #[error("Search error: {0}")]
    Search(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The results selector never appeared on the search page
    #[error("Timed out waiting for selector '{0}' on the results page")]
    SelectorTimeout(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Dwell operations
pub type Result<T> = std::result::Result<T, DwellError>;

impl DwellError {
    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a search error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
