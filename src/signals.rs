//! # Signal Extraction Module
//!
//! This module provides the four independent signal extractors that read the
//! crawled page set. Each extractor is a pure function `&[CrawledPage] ->
//! Bundle`: no hidden state, no ordering dependency between bundles, and an
//! empty page list yields all-false/zero/null defaults rather than an error.
//!
//! ## Key Components
//!
//! - `LandingPageSignals`: landing-page inventory, offer clarity, lead capture
//! - `CtaSignals`: deduplicated CTAs, primary CTA selection, clarity score
//! - `TrackingSignals`: analytics/retargeting/UTM/conversion-tracking detection
//! - `AdScentSignals`: ad-landing patterns and headline message consistency
//! - `SignalSet`: the bundle of all four, built once per pipeline run
//!
//! The extractors only borrow the pages; merging their contributions into the
//! run findings happens afterwards in the orchestrator.

mod ad_scent;
mod cta;
mod landing;
mod tracking;

pub use ad_scent::{AdScentSignals, MessageConsistency, analyze_ad_scent};
pub use cta::{CtaSignals, CtaType, analyze_ctas};
pub use landing::{LandingPageSignals, analyze_landing_pages};
pub use tracking::{TrackingSignals, UtmCoverage, analyze_tracking};

use crate::crawler::CrawledPage;
use serde::Serialize;
use tracing::instrument;

/// All four signal bundles for one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct SignalSet {
    /// Landing-page inventory signals
    pub landing: LandingPageSignals,

    /// Call-to-action signals
    pub cta: CtaSignals,

    /// Tracking and measurement signals
    pub tracking: TrackingSignals,

    /// Ad-scent and message-consistency signals
    pub ad_scent: AdScentSignals,
}

/// Run every extractor over the final page list
///
/// Must only be called after the crawl has fully completed — the extractors
/// are pure functions of the final page set.
#[instrument(skip(pages), fields(page_count = pages.len()))]
pub fn extract_signals(pages: &[CrawledPage]) -> SignalSet {
    SignalSet {
        landing: analyze_landing_pages(pages),
        cta: analyze_ctas(pages),
        tracking: analyze_tracking(pages),
        ad_scent: analyze_ad_scent(pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_list_yields_defaults() {
        let signals = extract_signals(&[]);

        assert_eq!(signals.landing.count, 0);
        assert!(!signals.landing.has_lead_capture);
        assert_eq!(signals.cta.count, 0);
        assert!(signals.cta.primary_cta.is_none());
        assert!(!signals.tracking.has_analytics);
        assert_eq!(
            signals.ad_scent.message_consistency,
            MessageConsistency::Unknown
        );
    }
}
