//! # DemandLab - Demand-Generation Diagnostics for Rust
//!
//! This crate implements a multi-stage pipeline that diagnoses how mature a
//! website's demand generation is. It crawls a bounded set of pages, extracts
//! typed signal bundles (landing pages, CTAs, tracking stack, ad scent),
//! joins in an optional analytics snapshot, and scores the site across five
//! weighted dimensions with an overall maturity stage, structured issues,
//! quick wins and strategic projects.
//!
//! ## Features
//!
//! - Bounded best-effort crawl that never fails on unreachable sites
//! - Four pure, independently-computed signal extractors
//! - Company-type-aware scoring: the same signals score differently for a
//!   SaaS vendor than for a local service business
//! - Data-confidence estimation with explicit under-confidence score caps
//! - Graceful degradation end to end: empty input produces a valid
//!   low-confidence "unproven" report, not an error
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use demandlab::pipeline::Pipeline;
//! use demandlab::scoring::CompanyType;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new()?;
//!     let report = pipeline
//!         .run("https://example.com", CompanyType::Saas, None)
//!         .await?;
//!
//!     println!("{}", report.render_text());
//!     Ok(())
//! }
//! ```

mod error;
mod http;

pub mod analytics;
pub mod confidence;
pub mod crawler;
pub mod findings;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod signals;

pub use error::Error;
pub use http::PageClient;

/// Re-export of commonly used types for public use
pub mod prelude {
    pub use crate::analytics::{AnalyticsProvider, AnalyticsSnapshot, NoAnalytics};
    pub use crate::confidence::{ConfidenceLevel, DataConfidence};
    pub use crate::crawler::{CrawledPage, CrawlerConfig, PageType};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{DemandLabReport, Pipeline};
    pub use crate::scoring::{CompanyType, DimensionKey, MaturityStage, ScoringOutput};
}
