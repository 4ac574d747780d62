//! Landing-page inventory signals

use crate::crawler::CrawledPage;
use serde::Serialize;

/// Action/value words that, next to a headline, mark a clear offer
const OFFER_WORDS: [&str; 6] = ["get ", "start ", "try ", "free", "demo", "trial"];

/// Landing-page signals for one crawl
#[derive(Debug, Clone, Serialize)]
pub struct LandingPageSignals {
    /// Number of pages classified landing or homepage
    pub count: usize,

    /// Whether at least one landing page exists beyond the root path
    pub has_dedicated_landing_page: bool,

    /// URLs of the landing pages, in crawl order
    pub urls: Vec<String>,

    /// Whether any landing page pairs a headline with an action/value word
    pub has_clear_offer: bool,

    /// Whether any crawled page (landing or not) carries a lead-capture form
    pub has_lead_capture: bool,
}

/// Analyze the landing-page inventory of a crawl
pub fn analyze_landing_pages(pages: &[CrawledPage]) -> LandingPageSignals {
    let landing_pages: Vec<&CrawledPage> = pages.iter().filter(|p| p.is_landing_page).collect();

    let has_dedicated_landing_page = landing_pages.iter().any(|p| p.path != "/");
    let urls = landing_pages.iter().map(|p| p.url.clone()).collect();

    // Offer clarity: a headline tag AND an action word, anywhere on any
    // landing page (OR across pages).
    let has_clear_offer = landing_pages.iter().any(|page| {
        let lower = page.html.to_lowercase();
        let has_headline = lower.contains("<h1") || lower.contains("<h2");
        has_headline && OFFER_WORDS.iter().any(|w| lower.contains(w))
    });

    let has_lead_capture = pages.iter().any(|p| p.has_form);

    LandingPageSignals {
        count: landing_pages.len(),
        has_dedicated_landing_page,
        urls,
        has_clear_offer,
        has_lead_capture,
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
    fn test_homepage_counts_but_is_not_dedicated() {
        let pages = vec![page("/", "<html><body><h1>Ship faster</h1></body></html>")];
        let signals = analyze_landing_pages(&pages);

        assert_eq!(signals.count, 1);
        assert!(!signals.has_dedicated_landing_page);
    }

    #[test]
    fn test_offer_clarity_needs_headline_and_action_word() {
        // Headline without action word
        let no_action = vec![page("/", "<html><body><h1>Welcome</h1></body></html>")];
        assert!(!analyze_landing_pages(&no_action).has_clear_offer);

        // Action word without headline
        let no_headline = vec![page("/", "<html><body><p>free forever</p></body></html>")];
        assert!(!analyze_landing_pages(&no_headline).has_clear_offer);

        // Both, OR'd across pages is not enough — they must co-occur on one page
        let both = vec![page(
            "/lp-offer",
            "<html><body><h2>Start shipping today</h2></body></html>",
        )];
        assert!(analyze_landing_pages(&both).has_clear_offer);
    }

    #[test]
    fn test_lead_capture_counts_any_page() {
        // The form lives on a pricing page, not a landing page
        let pages = vec![
            page("/", "<html><body><h1>Hi</h1></body></html>"),
            page(
                "/pricing",
                "<html><body><form><input type=\"email\"></form></body></html>",
            ),
        ];
        let signals = analyze_landing_pages(&pages);

        assert!(signals.has_lead_capture);
        assert_eq!(signals.count, 1);
    }
}
