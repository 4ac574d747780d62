//! Error types for the demandlab crate

use thiserror::Error;

/// Result type for demandlab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for demandlab operations
///
/// The analysis pipeline itself degrades gracefully (unreachable pages and
/// missing analytics become low scores, not errors), so this type surfaces
/// only for genuinely unusable input or serialization at the report boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL is not something the crawler can work with
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Crawl error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
