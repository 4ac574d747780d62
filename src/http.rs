//! HTTP client implementation for the demandlab crate
//!
//! This module provides the best-effort page fetcher used by the crawler. A
//! diagnostic run must survive an unreachable or half-broken site, so every
//! fetch resolves to `Some(body)` or `None` — network errors, timeouts and
//! non-2xx statuses all collapse to `None` and are reported only via logs.

use crate::error::{Error, Result};
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, instrument};

/// Hard per-request timeout for page fetches, in seconds
const FETCH_TIMEOUT_SECS: u64 = 10;

/// HTTP client for fetching pages from the target site
#[derive(Debug, Clone)]
pub struct PageClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Per-request timeout
    timeout: Duration,
}

impl PageClient {
    /// Create a new page client with the default timeout and user agent
    pub fn new() -> Result<Self> {
        Self::with_options(
            &format!("demandlab/{}", env!("CARGO_PKG_VERSION")),
            Duration::from_secs(FETCH_TIMEOUT_SECS),
        )
    }

    /// Create a new page client with a custom user agent and timeout
    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .user_agent(user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, timeout })
    }

    /// Fetch a page and return its body text
    ///
    /// Returns `None` on network error, timeout or non-2xx status. The caller
    /// treats `None` as "page doesn't exist" — there is no retry policy.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("Skipping {}: HTTP {}", url, status);
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!("Failed to read body from {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_page_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pricing")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>Plans</body></html>")
            .expect(1)
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        let body = client
            .fetch_page(&format!("{}/pricing", server.url()))
            .await;

        assert!(body.unwrap().contains("Plans"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_not_found_is_none() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("nope")
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        let body = client
            .fetch_page(&format!("{}/missing", server.url()))
            .await;

        assert!(body.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable_is_none() {
        // Port 1 is reliably closed; the fetch must swallow the error.
        let client = PageClient::new().unwrap();
        let body = client.fetch_page("http://127.0.0.1:1/").await;
        assert!(body.is_none());
    }
}
