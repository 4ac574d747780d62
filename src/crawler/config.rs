//! # Crawler Configuration Module
//!
//! This module provides configuration options for the diagnostic crawl,
//! including the page budget, the key-path keyword filter and the well-known
//! path probe list. It uses a builder pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawl parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration
//!
//! ## Features
//!
//! - Defaults tuned for a single bounded diagnostic pass (12 pages max)
//! - Byte floors that filter out soft-404 and stub pages
//! - Customizable keyword and probe-path lists
//! - User-agent customization

use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum number of pages to fetch in total
    pub max_pages: usize,

    /// Maximum number of keyword-matched internal links to follow
    pub max_key_links: usize,

    /// Per-request timeout
    pub fetch_timeout: Duration,

    /// User agent to use for requests
    pub user_agent: String,

    /// Minimum body size for a followed internal link (soft-404 heuristic)
    pub min_linked_page_bytes: usize,

    /// Minimum body size for a probed well-known path
    pub min_probed_page_bytes: usize,

    /// Path substrings that mark an internal link as worth following
    pub key_path_keywords: Vec<String>,

    /// Well-known marketing paths probed directly by URL concatenation
    pub probe_paths: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 12,
            max_key_links: 8,
            fetch_timeout: Duration::from_secs(10),
            user_agent: format!("demandlab-crawler/{}", env!("CARGO_PKG_VERSION")),
            min_linked_page_bytes: 500,
            min_probed_page_bytes: 1000,
            key_path_keywords: [
                "demo",
                "pricing",
                "plans",
                "contact",
                "trial",
                "get-started",
                "signup",
                "sign-up",
                "product",
                "features",
                "solutions",
                "services",
                "quote",
                "book",
            ]
            .map(String::from)
            .to_vec(),
            probe_paths: [
                "/demo",
                "/request-demo",
                "/book-a-demo",
                "/pricing",
                "/plans",
                "/contact",
                "/contact-us",
                "/get-started",
                "/signup",
                "/sign-up",
                "/free-trial",
                "/trial",
                "/features",
                "/product",
                "/solutions",
                "/services",
                "/about",
                "/quote",
                "/landing",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum number of pages to fetch
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the maximum number of keyword-matched links to follow
    pub fn max_key_links(mut self, max_key_links: usize) -> Self {
        self.config.max_key_links = max_key_links;
        self
    }

    /// Set the per-request timeout
    pub fn fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.config.fetch_timeout = fetch_timeout;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the path keywords used to filter internal links
    pub fn key_path_keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.key_path_keywords = keywords;
        self
    }

    /// Set the well-known paths probed directly
    pub fn probe_paths(mut self, probe_paths: Vec<String>) -> Self {
        self.config.probe_paths = probe_paths;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = CrawlerConfig::default();
        assert_eq!(config.max_pages, 12);
        assert_eq!(config.max_key_links, 8);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!(config.probe_paths.len() >= 15);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CrawlerConfig::builder()
            .max_pages(3)
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.max_pages, 3);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_key_links, 8);
    }
}
