//! # Website Crawler Module
//!
//! This module provides the bounded diagnostic crawl that feeds the demand
//! analysis pipeline. It is the first stage of the workflow, responsible for
//! gathering the small set of pages the signal extractors read.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Configuration for the crawl (page budget, byte floors, etc.)
//! - `CrawledPage`: A fetched page with its classification and derived flags
//! - `crawl_site`: Main entry point, producing an ordered page list
//!
//! ## Crawl Shape
//!
//! The crawl is a fixed three-step probe rather than a general frontier crawl:
//!
//! 1. Fetch the homepage with a hard timeout
//! 2. Follow internal links whose paths match the key-path keywords (bounded)
//! 3. Probe a fixed list of well-known marketing paths directly
//!
//! Every individual fetch failure is swallowed — an unreachable site yields an
//! empty-but-valid page list, which downstream stages score as low confidence.

mod classify;
mod config;
mod crawl;
mod error;
mod links;

// Re-export important types and functions
pub use classify::{classify_path, extract_title, has_cta_marker, has_lead_form};
pub use config::CrawlerConfig;
pub use crawl::crawl_site;
pub use error::CrawlError;
pub use links::{extract_internal_links, normalize_path};

use serde::Serialize;

/// Coarse classification of a crawled page, derived from its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// The site root
    Homepage,

    /// A campaign or conversion-focused page
    Landing,

    /// A pricing or plans page
    Pricing,

    /// A contact or quote page
    Contact,

    /// Anything else
    Other,
}

/// Represents a crawled page with its content and derived flags
///
/// Built once per successful fetch and immutable afterward; the signal
/// extractors only ever borrow these.
#[derive(Debug, Clone, Serialize)]
pub struct CrawledPage {
    /// Absolute URL of the page
    pub url: String,

    /// Normalized path of the page (deduplication key)
    pub path: String,

    /// Raw HTML body
    #[serde(skip)]
    pub html: String,

    /// Extracted `<title>` text, if any
    pub title: Option<String>,

    /// Classification derived from the path
    pub page_type: PageType,

    /// Whether the page carries a usable lead-capture form
    pub has_form: bool,

    /// Whether the page contains a recognizable call to action
    pub has_cta: bool,

    /// Whether the page counts as a landing page (landing or homepage type)
    pub is_landing_page: bool,
}

impl CrawledPage {
    /// Build a page record from a fetched body, deriving all flags
    pub fn from_fetched(url: String, path: String, html: String) -> Self {
        let page_type = classify_path(&path);
        let title = extract_title(&html);
        let lower = html.to_lowercase();
        let has_form = has_lead_form(&lower);
        let has_cta = has_cta_marker(&lower);
        let is_landing_page = matches!(page_type, PageType::Landing | PageType::Homepage);

        Self {
            url,
            path,
            html,
            title,
            page_type,
            has_form,
            has_cta,
            is_landing_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_construction_derives_flags() {
        let html = "<html><head><title>Acme</title></head>\
                    <body><h1>Ship faster</h1>\
                    <form><input type=\"email\"></form>\
                    <a href=\"/demo\">Book a Demo</a></body></html>";

        let page = CrawledPage::from_fetched(
            "https://acme.test/".to_string(),
            "/".to_string(),
            html.to_string(),
        );

        assert_eq!(page.page_type, PageType::Homepage);
        assert_eq!(page.title.as_deref(), Some("Acme"));
        assert!(page.has_form);
        assert!(page.has_cta);
        assert!(page.is_landing_page);
    }

    #[test]
    fn test_pricing_page_is_not_landing() {
        let page = CrawledPage::from_fetched(
            "https://acme.test/pricing".to_string(),
            "/pricing".to_string(),
            "<html><body>Plans</body></html>".to_string(),
        );

        assert_eq!(page.page_type, PageType::Pricing);
        assert!(!page.is_landing_page);
        assert!(!page.has_form);
    }
}
