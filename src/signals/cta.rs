//! Call-to-action extraction, deduplication and primary-CTA selection

use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::crawler::CrawledPage;
use regex::Regex;
use serde::Serialize;

/// Canonical CTA phrases matched as substrings anywhere in page HTML
const CANONICAL_PHRASES: [&str; 14] = [
    "get started",
    "start free trial",
    "book a demo",
    "request a demo",
    "request demo",
    "sign up",
    "try for free",
    "try it free",
    "contact sales",
    "talk to sales",
    "get a quote",
    "schedule a call",
    "learn more",
    "download",
];

/// CTA candidate text length bounds, in characters
const MIN_CTA_LEN: usize = 3;
const MAX_CTA_LEN: usize = 49;

/// Baseline and bonuses for the clarity score
const CLARITY_BASELINE: u8 = 50;
const CLARITY_ANY_CTA_BONUS: u8 = 20;
const CLARITY_PRIMARY_BONUS: u8 = 15;
const CLARITY_NO_COMPETITION_BONUS: u8 = 15;

/// More than this many distinct conversion-oriented CTA types counts as
/// competing. Calibration constant, preserved from observed behavior.
const COMPETING_TYPE_THRESHOLD: usize = 2;

fn button_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<button[^>]*>\s*([^<]{1,100}?)\s*</button>").unwrap())
}

fn anchor_button_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a[^>]+class="[^"]*(?:btn|button|cta)[^"]*"[^>]*>\s*([^<]{1,100}?)\s*</a>"#)
            .unwrap()
    })
}

/// CTA classification, declared in priority order (best first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaType {
    Demo,
    Trial,
    Contact,
    Download,
    Subscribe,
    Buy,
    Learn,
    Other,
}

impl CtaType {
    /// Whether this type asks for a conversion (vs. passive engagement)
    fn is_conversion_oriented(self) -> bool {
        matches!(
            self,
            CtaType::Demo | CtaType::Trial | CtaType::Contact | CtaType::Buy
        )
    }

    /// Rank used for primary-CTA selection (1 best, 8 worst)
    fn priority(self) -> u8 {
        match self {
            CtaType::Demo => 1,
            CtaType::Trial => 2,
            CtaType::Contact => 3,
            CtaType::Download => 4,
            CtaType::Subscribe => 5,
            CtaType::Buy => 6,
            CtaType::Learn => 7,
            CtaType::Other => 8,
        }
    }
}

/// Classify CTA text by a fixed priority-ordered keyword match
///
/// Text containing multiple keyword families resolves to the first matching
/// rule in this exact order.
pub fn classify_cta(text: &str) -> CtaType {
    let lower = text.to_lowercase();

    if lower.contains("demo") {
        CtaType::Demo
    } else if lower.contains("trial") || lower.contains("try") || lower.contains("start") {
        CtaType::Trial
    } else if lower.contains("contact")
        || lower.contains("talk")
        || lower.contains("call")
        || lower.contains("quote")
    {
        CtaType::Contact
    } else if lower.contains("download") {
        CtaType::Download
    } else if lower.contains("subscribe") || lower.contains("sign up") || lower.contains("newsletter")
    {
        CtaType::Subscribe
    } else if lower.contains("buy")
        || lower.contains("purchase")
        || lower.contains("order")
        || lower.contains("shop")
    {
        CtaType::Buy
    } else if lower.contains("learn") || lower.contains("read more") {
        CtaType::Learn
    } else {
        CtaType::Other
    }
}

/// One CTA occurrence before deduplication
#[derive(Debug, Clone)]
struct CtaCandidate {
    text: String,
    cta_type: CtaType,
    /// True for the first CTA found on its page
    is_primary: bool,
}

/// CTA signals for one crawl
#[derive(Debug, Clone, Serialize)]
pub struct CtaSignals {
    /// Number of distinct CTAs after case-insensitive deduplication
    pub count: usize,

    /// Text of the top-ranked CTA, if one resolved
    pub primary_cta: Option<String>,

    /// Distinct CTA types seen across the site
    pub cta_types: BTreeSet<CtaType>,

    /// Clarity score, 0-100
    pub clarity_score: u8,

    /// Whether too many conversion-oriented CTA types compete
    pub has_competing_ctas: bool,

    /// Deduplicated CTA texts, first-occurrence order (findings rollup)
    pub texts: Vec<String>,
}

/// Analyze CTAs across the crawled page set
pub fn analyze_ctas(pages: &[CrawledPage]) -> CtaSignals {
    let mut candidates: Vec<CtaCandidate> = Vec::new();

    for page in pages {
        let mut first_on_page = true;
        let mut push = |text: &str, candidates: &mut Vec<CtaCandidate>| {
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let len = text.chars().count();
            if len < MIN_CTA_LEN || len > MAX_CTA_LEN {
                return;
            }
            candidates.push(CtaCandidate {
                cta_type: classify_cta(&text),
                text,
                is_primary: first_on_page,
            });
            first_on_page = false;
        };

        for capture in button_regex().captures_iter(&page.html) {
            push(&capture[1], &mut candidates);
        }
        for capture in anchor_button_regex().captures_iter(&page.html) {
            push(&capture[1], &mut candidates);
        }

        let lower = page.html.to_lowercase();
        for phrase in CANONICAL_PHRASES {
            if lower.contains(phrase) {
                push(phrase, &mut candidates);
            }
        }
    }

    // Dedup case-insensitively by exact text; the first occurrence wins and
    // keeps its is_primary flag.
    let mut deduped: Vec<CtaCandidate> = Vec::new();
    for candidate in candidates {
        let key = candidate.text.to_lowercase();
        if !deduped.iter().any(|c| c.text.to_lowercase() == key) {
            deduped.push(candidate);
        }
    }

    let cta_types: BTreeSet<CtaType> = deduped.iter().map(|c| c.cta_type).collect();

    // Primary selection: best type priority wins, page-primary breaks ties,
    // first occurrence breaks the rest.
    let primary_cta = deduped
        .iter()
        .min_by_key(|c| (c.cta_type.priority(), !c.is_primary))
        .map(|c| c.text.clone());

    let conversion_types = cta_types
        .iter()
        .filter(|t| t.is_conversion_oriented())
        .count();
    let has_competing_ctas = conversion_types > COMPETING_TYPE_THRESHOLD;

    let mut clarity_score = CLARITY_BASELINE;
    if !deduped.is_empty() {
        clarity_score += CLARITY_ANY_CTA_BONUS;
    }
    if primary_cta.is_some() {
        clarity_score += CLARITY_PRIMARY_BONUS;
    }
    if !has_competing_ctas {
        clarity_score += CLARITY_NO_COMPETITION_BONUS;
    }
    let clarity_score = clarity_score.min(100);

    CtaSignals {
        count: deduped.len(),
        primary_cta,
        cta_types,
        clarity_score,
        has_competing_ctas,
        texts: deduped.into_iter().map(|c| c.text).collect(),
    }
}
