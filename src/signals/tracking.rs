//! Tracking and measurement stack detection

use crate::crawler::CrawledPage;
use serde::Serialize;

/// What a detected vendor says about the site's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VendorKind {
    Analytics,
    Retargeting,
}

/// One vendor signature: display name, HTML markers, classification
struct VendorSignature {
    name: &'static str,
    markers: &'static [&'static str],
    kind: VendorKind,
}

/// Fixed catalog of vendor signatures, matched case-insensitively
const VENDOR_CATALOG: [VendorSignature; 9] = [
    VendorSignature {
        name: "Google Analytics",
        markers: &["google-analytics.com", "gtag("],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "Google Tag Manager",
        markers: &["googletagmanager.com"],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "Segment",
        markers: &["cdn.segment.com", "analytics.load("],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "HotJar",
        markers: &["hotjar"],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "HubSpot",
        markers: &["hs-scripts.com", "hubspot"],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "Intercom",
        markers: &["intercom"],
        kind: VendorKind::Analytics,
    },
    VendorSignature {
        name: "Facebook Pixel",
        markers: &["connect.facebook.net", "fbq("],
        kind: VendorKind::Retargeting,
    },
    VendorSignature {
        name: "LinkedIn Insight",
        markers: &["snap.licdn.com", "linkedin insight"],
        kind: VendorKind::Retargeting,
    },
    VendorSignature {
        name: "Google Ads",
        markers: &["googleadservices.com", "google_conversion"],
        kind: VendorKind::Retargeting,
    },
];

/// UTM parameter markers
const UTM_MARKERS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Text proxies for a conversion/thank-you flow
const CONVERSION_TEXT_MARKERS: [&str; 3] = ["thank you", "confirmation", "success"];

/// Share of pages that must carry UTM markers for "consistent" coverage
const CONSISTENT_UTM_RATIO: f64 = 0.5;

/// How widely UTM parameters are used across the crawled pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtmCoverage {
    /// No UTM markers anywhere
    None,
    /// Some pages carry markers
    Partial,
    /// At least half the pages carry markers
    Consistent,
}

/// Tracking signals for one crawl
///
/// All booleans are OR-accumulated: one matching page anywhere sets the flag
/// for the whole site.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingSignals {
    /// Whether any page carries UTM parameters
    pub uses_utm: bool,

    /// Whether a conversion flow appears to be tracked
    pub has_conversion_tracking: bool,

    /// Whether an analytics platform is installed
    pub has_analytics: bool,

    /// Whether a retargeting/ad pixel is installed
    pub has_retargeting: bool,

    /// UTM usage, classified into three levels for scoring
    pub utm_coverage: UtmCoverage,

    /// Display names of every detected vendor (findings rollup)
    pub vendors: Vec<String>,
}

/// Scan all page HTML for the tracking stack
pub fn analyze_tracking(pages: &[CrawledPage]) -> TrackingSignals {
    let mut has_analytics = false;
    let mut has_retargeting = false;
    let mut has_conversion_tracking = false;
    let mut vendors: Vec<String> = Vec::new();
    let mut utm_pages = 0usize;

    for page in pages {
        let lower = page.html.to_lowercase();

        for signature in &VENDOR_CATALOG {
            if signature.markers.iter().any(|m| lower.contains(m)) {
                match signature.kind {
                    VendorKind::Analytics => has_analytics = true,
                    VendorKind::Retargeting => has_retargeting = true,
                }
                if !vendors.iter().any(|v| v == signature.name) {
                    vendors.push(signature.name.to_string());
                }
            }
        }

        if UTM_MARKERS.iter().any(|m| lower.contains(m)) {
            utm_pages += 1;
        }

        // Conversion-tracking proxies: thank-you/confirmation text, or a form
        // that actually submits somewhere.
        if CONVERSION_TEXT_MARKERS.iter().any(|m| lower.contains(m)) {
            has_conversion_tracking = true;
        }
        if lower.contains("<form") && (lower.contains("submit") || lower.contains("action=")) {
            has_conversion_tracking = true;
        }
    }

    let utm_coverage = if utm_pages == 0 || pages.is_empty() {
        UtmCoverage::None
    } else if utm_pages as f64 / pages.len() as f64 >= CONSISTENT_UTM_RATIO {
        UtmCoverage::Consistent
    } else {
        UtmCoverage::Partial
    };

    TrackingSignals {
        uses_utm: utm_pages > 0,
        has_conversion_tracking,
        has_analytics,
        has_retargeting,
        utm_coverage,
        vendors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, html: &str) -> CrawledPage {
        CrawledPage::from_fetched(
            format!("https://acme.test{}", path),
            path.to_string(),
            html.to_string(),
        )
    }

    #[test]
    fn test_single_page_sets_site_wide_flags() {
        let pages = vec![
            page("/", "<html><body>plain</body></html>"),
            page(
                "/pricing",
                "<html><head><script src=\"https://www.googletagmanager.com/gtm.js\"></script>\
                 <script>fbq('init', '123');</script></head><body></body></html>",
            ),
        ];
        let signals = analyze_tracking(&pages);

        assert!(signals.has_analytics);
        assert!(signals.has_retargeting);
        assert_eq!(
            signals.vendors,
            vec!["Google Tag Manager", "Facebook Pixel"]
        );
    }

    #[test]
    fn test_conversion_tracking_proxies() {
        let thank_you = vec![page("/", "<html><body>Thank you for signing up</body></html>")];
        assert!(analyze_tracking(&thank_you).has_conversion_tracking);

        let submitting_form = vec![page(
            "/",
            "<html><body><form action=\"/lead\"><input type=\"submit\"></form></body></html>",
        )];
        assert!(analyze_tracking(&submitting_form).has_conversion_tracking);

        let neither = vec![page("/", "<html><body>About us</body></html>")];
        assert!(!analyze_tracking(&neither).has_conversion_tracking);
    }

    #[test]
    fn test_utm_coverage_levels() {
        let none = vec![page("/", "<html></html>"), page("/a", "<html></html>")];
        assert_eq!(analyze_tracking(&none).utm_coverage, UtmCoverage::None);

        let partial = vec![
            page("/", "<a href=\"/x?utm_source=ad\">x</a>"),
            page("/a", "<html></html>"),
            page("/b", "<html></html>"),
        ];
        let signals = analyze_tracking(&partial);
        assert_eq!(signals.utm_coverage, UtmCoverage::Partial);
        assert!(signals.uses_utm);

        let consistent = vec![
            page("/", "<a href=\"/x?utm_source=ad\">x</a>"),
            page("/a", "<a href=\"/y?utm_campaign=spring\">y</a>"),
        ];
        assert_eq!(
            analyze_tracking(&consistent).utm_coverage,
            UtmCoverage::Consistent
        );
    }
}
