//! Error types for the crawler module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
///
/// Individual fetch failures never surface here — they are swallowed and the
/// page is treated as absent. Only an unusable base URL is an error.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The base URL cannot be crawled (bad scheme, no host)
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::UrlParse(e) => CrateError::Url(e),
            CrawlError::InvalidTarget(msg) => CrateError::InvalidTarget(msg),
            CrawlError::Other(msg) => CrateError::Crawl(msg),
        }
    }
}
