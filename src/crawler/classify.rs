//! Page classification and per-page flag detection
//!
//! Classification is path-keyword driven; the `has_form`/`has_cta` flags are
//! substring heuristics over lowercased HTML. These feed both the crawl
//! findings and the landing-page signal extractor.

use crate::crawler::PageType;
use scraper::{Html, Selector};

/// Path keywords that mark a page as conversion/campaign focused
const LANDING_KEYWORDS: [&str; 9] = [
    "landing",
    "promo",
    "offer",
    "campaign",
    "demo",
    "trial",
    "get-started",
    "signup",
    "sign-up",
];

/// Canonical CTA phrases checked for the per-page `has_cta` flag
const PAGE_CTA_PHRASES: [&str; 11] = [
    "get started",
    "start free trial",
    "free trial",
    "book a demo",
    "request a demo",
    "request demo",
    "sign up",
    "try for free",
    "contact sales",
    "get a quote",
    "schedule a call",
];

/// Input markers that make a `<form>` count as lead capture
const FORM_INPUT_MARKERS: [&str; 6] = [
    "type=\"email\"",
    "type='email'",
    "type=\"text\"",
    "type='text'",
    "type=\"submit\"",
    "type='submit'",
];

/// Classify a page by its normalized path
///
/// Checks run in fixed order: homepage, pricing, contact, landing, other.
pub fn classify_path(path: &str) -> PageType {
    if path == "/" {
        return PageType::Homepage;
    }

    let lower = path.to_lowercase();
    if lower.contains("pricing") || lower.contains("plans") {
        return PageType::Pricing;
    }
    if lower.contains("contact") || lower.contains("quote") {
        return PageType::Contact;
    }
    if is_landing_path(&lower) {
        return PageType::Landing;
    }

    PageType::Other
}

/// Whether a lowercased path looks like a campaign landing page
///
/// The `lp` shorthand is matched per segment, not as a substring, so `/help`
/// doesn't count.
pub fn is_landing_path(lower_path: &str) -> bool {
    if LANDING_KEYWORDS.iter().any(|k| lower_path.contains(k)) {
        return true;
    }
    lower_path
        .split('/')
        .any(|segment| segment == "lp" || segment.starts_with("lp-") || segment.ends_with("-lp"))
}

/// Whether lowercased HTML contains a lead-capture form
///
/// Requires a `<form>` tag co-occurring with an email/text/submit input marker.
pub fn has_lead_form(lower_html: &str) -> bool {
    lower_html.contains("<form") && FORM_INPUT_MARKERS.iter().any(|m| lower_html.contains(m))
}

/// Whether lowercased HTML contains a canonical CTA phrase
pub fn has_cta_marker(lower_html: &str) -> bool {
    PAGE_CTA_PHRASES.iter().any(|p| lower_html.contains(p))
}

/// Extract the `<title>` text from raw HTML
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_fixed_order() {
        assert_eq!(classify_path("/"), PageType::Homepage);
        assert_eq!(classify_path("/pricing"), PageType::Pricing);
        assert_eq!(classify_path("/plans/enterprise"), PageType::Pricing);
        assert_eq!(classify_path("/contact-us"), PageType::Contact);
        assert_eq!(classify_path("/request-demo"), PageType::Landing);
        assert_eq!(classify_path("/lp/spring-sale"), PageType::Landing);
        assert_eq!(classify_path("/blog/post"), PageType::Other);
    }

    #[test]
    fn test_help_is_not_a_landing_page() {
        assert_eq!(classify_path("/help"), PageType::Other);
        assert!(!is_landing_path("/help"));
        assert!(is_landing_path("/lp-spring"));
    }

    #[test]
    fn test_form_requires_input_marker() {
        assert!(has_lead_form(
            "<form action=\"/subscribe\"><input type=\"email\"></form>"
        ));
        // A form with no recognizable inputs is not lead capture
        assert!(!has_lead_form("<form action=\"/search\"></form>"));
        assert!(!has_lead_form("<input type=\"email\">"));
    }

    #[test]
    fn test_cta_marker_detection() {
        assert!(has_cta_marker("<a href=\"/demo\">book a demo today</a>"));
        assert!(!has_cta_marker("<p>read our documentation</p>"));
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("<html><head><title> Acme — Home </title></head></html>").as_deref(),
            Some("Acme — Home")
        );
        assert_eq!(extract_title("<html><head></head></html>"), None);
    }
}
