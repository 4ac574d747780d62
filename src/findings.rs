//! Run findings rollup
//!
//! The crawler and the extractors each return their own contribution; this
//! module merges them into one findings structure after everything has
//! completed. Nothing here mutates shared state during the run.

use crate::analytics::AnalyticsSnapshot;
use crate::crawler::{CrawledPage, PageType};
use crate::signals::SignalSet;
use serde::Serialize;

/// One analyzed page, as surfaced in reports
#[derive(Debug, Clone, Serialize)]
pub struct PageFinding {
    /// Absolute URL
    pub url: String,

    /// Normalized path
    pub path: String,

    /// Page title, if any
    pub title: Option<String>,

    /// Classified page type
    pub page_type: PageType,

    /// Whether the page has a lead-capture form
    pub has_form: bool,

    /// Whether the page has a recognizable CTA
    pub has_cta: bool,
}

/// Everything the run observed, rolled up for report consumers
#[derive(Debug, Clone, Serialize)]
pub struct DemandLabFindings {
    /// Every page analyzed, in crawl order
    pub pages_analyzed: Vec<PageFinding>,

    /// Deduplicated CTA texts found across the site
    pub ctas_found: Vec<String>,

    /// Display names of detected tracking vendors
    pub tracking_detected: Vec<String>,

    /// One-line landing-page rollup
    pub landing_page_insight: String,

    /// One-line traffic-channel rollup
    pub channel_insight: String,
}

/// Merge per-stage contributions into the findings rollup
pub fn merge_findings(
    pages: &[CrawledPage],
    signals: &SignalSet,
    snapshot: Option<&AnalyticsSnapshot>,
) -> DemandLabFindings {
    let pages_analyzed = pages
        .iter()
        .map(|page| PageFinding {
            url: page.url.clone(),
            path: page.path.clone(),
            title: page.title.clone(),
            page_type: page.page_type,
            has_form: page.has_form,
            has_cta: page.has_cta,
        })
        .collect();

    let landing = &signals.landing;
    let landing_page_insight = if landing.count == 0 {
        "No landing pages found".to_string()
    } else {
        format!(
            "{} landing page(s); {}; {}",
            landing.count,
            if landing.has_dedicated_landing_page {
                "dedicated pages beyond the homepage"
            } else {
                "homepage only"
            },
            if landing.has_clear_offer {
                "offer reads clearly"
            } else {
                "offer is unclear"
            },
        )
    };

    let channel_insight = match snapshot {
        Some(snapshot) if !snapshot.channels.is_empty() => format!(
            "Traffic from {} channel(s): {}",
            snapshot.channels.len(),
            snapshot.channels.join(", ")
        ),
        Some(_) => "Analytics connected but no channel breakdown available".to_string(),
        None => "No analytics data available".to_string(),
    };

    DemandLabFindings {
        pages_analyzed,
        ctas_found: signals.cta.texts.clone(),
        tracking_detected: signals.tracking.vendors.clone(),
        landing_page_insight,
        channel_insight,
    }
}
