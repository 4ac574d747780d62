//! Link extraction and path normalization for the crawler module

use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::warn;
use url::Url;

/// Schemes that are never navigable page links
const NON_NAVIGABLE_PREFIXES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

/// Normalize a URL path for deduplication
///
/// Collapses `//`, resolves `./` and `../` segments, and strips the trailing
/// slash (the root stays `/`). Every path entering the crawler's visited set
/// goes through this first.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Extract same-origin navigable links from raw HTML
///
/// Anchors, `mailto:`, `tel:` and `javascript:` hrefs are excluded, relative
/// hrefs are resolved against `base`, and the result is a deduplicated list of
/// normalized paths in first-occurrence order.
pub fn extract_internal_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Failed to parse anchor selector: {}", e);
            return Vec::new();
        }
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut paths = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let href_lower = href.to_lowercase();
        if NON_NAVIGABLE_PREFIXES
            .iter()
            .any(|prefix| href_lower.starts_with(prefix))
        {
            continue;
        }

        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.origin() != base.origin() {
            continue;
        }

        let path = normalize_path(resolved.path());
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_collapses_dots_and_slashes() {
        assert_eq!(normalize_path("/a/./b/../c"), "/a/c");
        assert_eq!(normalize_path("//pricing//"), "/pricing");
        assert_eq!(normalize_path("/demo/"), "/demo");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_extract_skips_non_navigable_schemes() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r##"<html><body>
            <a href="/pricing">Pricing</a>
            <a href="mailto:sales@acme.test">Email</a>
            <a href="tel:+15550100">Call</a>
            <a href="javascript:void(0)">Open</a>
            <a href="#features">Jump</a>
        </body></html>"##;

        let links = extract_internal_links(html, &base);
        assert_eq!(links, vec!["/pricing"]);
    }

    #[test]
    fn test_extract_keeps_same_origin_only() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r#"<html><body>
            <a href="https://acme.test/demo">Demo</a>
            <a href="https://other.test/demo">Elsewhere</a>
            <a href="contact">Contact</a>
        </body></html>"#;

        let links = extract_internal_links(html, &base);
        assert_eq!(links, vec!["/demo", "/contact"]);
    }

    #[test]
    fn test_extract_dedups_by_normalized_path() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r#"<html><body>
            <a href="/pricing">Pricing</a>
            <a href="/pricing/">Pricing again</a>
            <a href="/a/../pricing">Still pricing</a>
        </body></html>"#;

        let links = extract_internal_links(html, &base);
        assert_eq!(links, vec!["/pricing"]);
    }
}
