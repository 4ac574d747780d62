//! Data-confidence estimation
//!
//! The confidence score is a meta-signal: how much should anyone trust the
//! dimension scores, given how much evidence the run actually gathered. It is
//! an additive sum of non-negative bonuses, which makes it monotone in both
//! analytics richness and crawl coverage — adding evidence can never lower it.

use crate::analytics::AnalyticsSnapshot;
use serde::Serialize;

/// Level thresholds over the 0-100 score
const HIGH_THRESHOLD: u8 = 70;
const MEDIUM_THRESHOLD: u8 = 40;

/// Session volume above which analytics data counts as substantial
const SUBSTANTIAL_SESSIONS: u64 = 1000;

/// Paid share above which the paid-channel picture counts as known
const KNOWN_PAID_SHARE: f64 = 0.05;

/// Confidence level derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// How much the gathered evidence supports the computed scores
#[derive(Debug, Clone, Serialize)]
pub struct DataConfidence {
    /// Score 0-100, clamped
    pub score: u8,

    /// Coarse level derived from the score
    pub level: ConfidenceLevel,

    /// Human-readable explanation of the score
    pub reason: String,
}

impl DataConfidence {
    /// Whether this run should be treated as data-starved
    pub fn is_low(&self) -> bool {
        self.level == ConfidenceLevel::Low
    }
}

/// Estimate confidence from analytics availability and crawl coverage
pub fn estimate_confidence(
    snapshot: Option<&AnalyticsSnapshot>,
    page_count: usize,
) -> DataConfidence {
    let mut score: u32 = 10;

    score += match page_count {
        0 => 0,
        1..=3 => 5,
        4..=7 => 10,
        _ => 15,
    };

    let mut reason_parts: Vec<String> = Vec::new();
    reason_parts.push(format!("{} pages crawled", page_count));

    match snapshot {
        Some(snapshot) => {
            score += 35;

            let volume = snapshot.session_volume.unwrap_or(0);
            if volume >= SUBSTANTIAL_SESSIONS {
                score += 15;
            }
            if snapshot.conversion_rate.is_some() {
                score += 10;
            }
            if snapshot.paid_share.is_some_and(|s| s > KNOWN_PAID_SHARE) {
                score += 10;
            }

            reason_parts.push(format!("analytics connected ({} sessions)", volume));
        }
        None => {
            reason_parts.push("no analytics data".to_string());
        }
    }

    let score = score.min(100) as u8;
    let level = if score >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    DataConfidence {
        score,
        level,
        reason: reason_parts.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            conversion_rate: Some(0.02),
            paid_share: Some(0.3),
            session_volume: Some(5000),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_evidence_is_low() {
        let confidence = estimate_confidence(None, 0);
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert_eq!(confidence.score, 10);
    }

    #[test]
    fn test_rich_snapshot_with_full_crawl_is_high() {
        let snapshot = rich_snapshot();
        let confidence = estimate_confidence(Some(&snapshot), 10);
        assert_eq!(confidence.level, ConfidenceLevel::High);
        assert_eq!(confidence.score, 95);
    }

    #[test]
    fn test_crawl_only_stays_low() {
        // A full crawl without analytics must not climb out of low: the
        // scoring caps key off this.
        let confidence = estimate_confidence(None, 12);
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert_eq!(confidence.score, 25);
    }

    #[test]
    fn test_adding_analytics_never_decreases_score() {
        let snapshot = rich_snapshot();
        for pages in [0usize, 1, 3, 4, 7, 8, 12] {
            let without = estimate_confidence(None, pages);
            let with = estimate_confidence(Some(&snapshot), pages);
            assert!(with.score >= without.score, "pages={}", pages);
        }
    }
}
