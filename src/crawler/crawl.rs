//! The crawl controller: homepage, key internal links, well-known path probe

use std::collections::HashSet;

use tracing::{debug, info, instrument};
use url::Url;

use crate::crawler::error::CrawlError;
use crate::crawler::links::{extract_internal_links, normalize_path};
use crate::crawler::{CrawledPage, CrawlerConfig};
use crate::http::PageClient;

/// Marker text that identifies a soft-404 page served with HTTP 200
const SOFT_404_MARKER: &str = "page not found";

/// Crawl a site and produce its ordered page list
///
/// The only failure mode is an unusable base URL. Every individual fetch
/// failure is swallowed: a fully unreachable site yields `Ok(vec![])`, which
/// downstream stages turn into low confidence and floor scores.
///
/// # Arguments
///
/// * `client` - The page fetcher (carries the timeout and user agent)
/// * `base_url` - The site to crawl
/// * `config` - The crawl budget and filter lists
///
/// # Returns
///
/// Crawled pages in first-discovered order, at most `config.max_pages`.
#[instrument(skip(client, config))]
pub async fn crawl_site(
    client: &PageClient,
    base_url: &str,
    config: &CrawlerConfig,
) -> Result<Vec<CrawledPage>, CrawlError> {
    let base = Url::parse(base_url)?;
    match base.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CrawlError::InvalidTarget(format!(
                "unsupported scheme '{}'",
                other
            )));
        }
    }
    if base.host_str().is_none() {
        return Err(CrawlError::InvalidTarget(format!(
            "no host in '{}'",
            base_url
        )));
    }
    let origin = base.origin().ascii_serialization();

    let mut pages: Vec<CrawledPage> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();

    // Stage 1: homepage. Failure here does not abort the run — the well-known
    // path probe below can still find pages.
    let homepage_url = format!("{}/", origin);
    match client.fetch_page(&homepage_url).await {
        Some(body) => {
            visited.insert("/".to_string());
            let homepage = CrawledPage::from_fetched(homepage_url, "/".to_string(), body);

            // Stage 2: internal links whose paths match the key keywords
            let key_paths: Vec<String> = extract_internal_links(&homepage.html, &base)
                .into_iter()
                .filter(|path| path != "/" && matches_key_keyword(path, config))
                .take(config.max_key_links)
                .collect();

            pages.push(homepage);

            for path in key_paths {
                if pages.len() >= config.max_pages {
                    break;
                }
                if !visited.insert(path.clone()) {
                    continue;
                }
                let url = format!("{}{}", origin, path);
                if let Some(body) = client.fetch_page(&url).await {
                    if body.len() < config.min_linked_page_bytes {
                        debug!("Skipping {} ({} bytes, likely soft 404)", path, body.len());
                        continue;
                    }
                    pages.push(CrawledPage::from_fetched(url, path, body));
                }
            }
        }
        None => {
            info!("Homepage unreachable for {}, probing known paths only", origin);
        }
    }

    // Stage 3: probe well-known marketing paths directly
    for probe in &config.probe_paths {
        if pages.len() >= config.max_pages {
            break;
        }
        let path = normalize_path(probe);
        if !visited.insert(path.clone()) {
            continue;
        }
        let url = format!("{}{}", origin, path);
        if let Some(body) = client.fetch_page(&url).await {
            if body.len() < config.min_probed_page_bytes {
                debug!("Skipping probe {} ({} bytes)", path, body.len());
                continue;
            }
            if body.to_lowercase().contains(SOFT_404_MARKER) {
                debug!("Skipping probe {} (soft 404 marker)", path);
                continue;
            }
            pages.push(CrawledPage::from_fetched(url, path, body));
        }
    }

    info!("Crawled {} pages from {}", pages.len(), origin);
    Ok(pages)
}

fn matches_key_keyword(path: &str, config: &CrawlerConfig) -> bool {
    let lower = path.to_lowercase();
    config.key_path_keywords.iter().any(|k| lower.contains(k))
}
