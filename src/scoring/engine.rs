//! The five-dimension scoring engine
//!
//! Every dimension is computed independently from the same inputs; the only
//! cross-dimension reads happen at the very end, in the overall safety caps.
//! Scores accumulate in a local builder and are clamped and frozen into the
//! `Dimension` record — nothing mutates a dimension after construction.

use serde_json::Value;
use tracing::instrument;

use crate::analytics::AnalyticsSnapshot;
use crate::confidence::DataConfidence;
use crate::scoring::{
    CompanyType, Dimension, DimensionKey, DimensionStatus, Evidence, Issue, MaturityStage,
    ScoringOutput, Severity,
};
use crate::signals::{SignalSet, UtmCoverage};

/// Dimension baselines
const CHANNEL_BASELINE: i32 = 65;
const CHANNEL_ZERO_TRAFFIC_BASELINE: i32 = 30;
const TARGETING_BASELINE: i32 = 55;
const TARGETING_NO_PAID_BASELINE: i32 = 35;
const CREATIVE_BASELINE: i32 = 55;
const FUNNEL_BASELINE: i32 = 60;
const MEASUREMENT_BASELINE: i32 = 55;

/// Under-confidence ceilings
const FUNNEL_LOW_DATA_CAP: i32 = 75;
const MEASUREMENT_LOW_CONFIDENCE_CAP: i32 = 65;

/// Overall safety caps
const WEAK_ACQUISITION_CAP: u8 = 55;
const LOW_CONFIDENCE_CAP: u8 = 65;

/// Paid share below which a B2B/SaaS paid motion counts as thin
const THIN_PAID_SHARE: f64 = 0.05;

/// Session volume below which the conversion rate is evidence, not signal
const BANDING_MIN_SESSIONS: u64 = 50;

/// Incremental builder for one dimension; frozen exactly once
struct DimensionBuilder {
    key: DimensionKey,
    score: i32,
    issues: Vec<Issue>,
    evidence: Evidence,
}

impl DimensionBuilder {
    fn new(key: DimensionKey, baseline: i32) -> Self {
        Self {
            key,
            score: baseline,
            issues: Vec::new(),
            evidence: Evidence::default(),
        }
    }

    fn adjust(&mut self, delta: i32) {
        self.score += delta;
    }

    fn cap(&mut self, max: i32) {
        self.score = self.score.min(max);
    }

    fn found(&mut self, what: impl Into<String>) {
        self.evidence.found.push(what.into());
    }

    fn missing(&mut self, what: impl Into<String>) {
        self.evidence.missing.push(what.into());
    }

    fn data_point(&mut self, key: &str, value: impl Into<Value>) {
        self.evidence.data_points.insert(key.to_string(), value.into());
    }

    fn issue(&mut self, id: &str, severity: Severity, title: &str, description: String) {
        self.issue_in_category(id, self.key, severity, title, description);
    }

    /// Raise an issue filed under a different dimension's category (used by
    /// the conversion-noise branch, which lives in Funnel but is a
    /// Measurement problem)
    fn issue_in_category(
        &mut self,
        id: &str,
        category: DimensionKey,
        severity: Severity,
        title: &str,
        description: String,
    ) {
        self.issues.push(Issue {
            id: id.to_string(),
            category: category.label().to_string(),
            severity,
            title: title.to_string(),
            description,
        });
    }

    fn freeze(self, summary: String) -> Dimension {
        let score = self.score.clamp(0, 100) as u8;
        Dimension {
            key: self.key,
            score,
            status: DimensionStatus::from_score(score),
            summary,
            issues: self.issues,
            evidence: self.evidence,
        }
    }
}

/// Score the site across all five dimensions
///
/// Deterministic for identical inputs, and total: every combination of
/// empty/null/zero inputs routes to floor scores instead of failing.
#[instrument(skip_all, fields(company_type = ?company_type))]
pub fn score_demand(
    signals: &SignalSet,
    snapshot: Option<&AnalyticsSnapshot>,
    confidence: &DataConfidence,
    company_type: CompanyType,
) -> ScoringOutput {
    let dimensions = vec![
        score_channel_mix(signals, snapshot, company_type),
        score_targeting(signals, snapshot),
        score_creative(signals),
        score_funnel(signals, snapshot, confidence, company_type),
        score_measurement(signals, confidence),
    ];

    let mean = dimensions.iter().map(|d| d.score as f64).sum::<f64>() / dimensions.len() as f64;
    let overall_score = apply_overall_caps(
        mean.round() as u8,
        dimensions[0].score,
        dimensions[1].score,
        confidence.is_low(),
    );

    let issues: Vec<Issue> = dimensions
        .iter()
        .flat_map(|d| d.issues.iter().cloned())
        .collect();

    ScoringOutput {
        maturity: MaturityStage::from_score(overall_score),
        overall_score,
        dimensions,
        issues,
    }
}

/// Apply the two ordered overall safety caps
///
/// 1. Channel Mix and Targeting both weak caps the overall at 55: strong
///    funnel/creative/measurement scores must not mask an absent acquisition
///    motion.
/// 2. Low data confidence caps the overall at 65.
pub(crate) fn apply_overall_caps(
    overall: u8,
    channel_mix_score: u8,
    targeting_score: u8,
    low_confidence: bool,
) -> u8 {
    let mut capped = overall;
    if channel_mix_score < 50 && targeting_score < 50 {
        capped = capped.min(WEAK_ACQUISITION_CAP);
    }
    if low_confidence {
        capped = capped.min(LOW_CONFIDENCE_CAP);
    }
    capped
}

fn paid_share(snapshot: Option<&AnalyticsSnapshot>) -> f64 {
    snapshot.and_then(|s| s.paid_share).unwrap_or(0.0)
}

fn session_volume(snapshot: Option<&AnalyticsSnapshot>) -> u64 {
    snapshot.and_then(|s| s.session_volume).unwrap_or(0)
}

fn score_channel_mix(
    signals: &SignalSet,
    snapshot: Option<&AnalyticsSnapshot>,
    company_type: CompanyType,
) -> Dimension {
    let volume = session_volume(snapshot);
    let baseline = if volume == 0 {
        CHANNEL_ZERO_TRAFFIC_BASELINE
    } else {
        CHANNEL_BASELINE
    };
    let mut d = DimensionBuilder::new(DimensionKey::ChannelMix, baseline);
    d.data_point("session_volume", volume);

    let paid = paid_share(snapshot);
    if paid <= 0.0 {
        d.missing("paid traffic");
        match company_type {
            CompanyType::Ecommerce => {
                d.adjust(-25);
                d.issue(
                    "channel-no-paid",
                    Severity::High,
                    "No paid acquisition",
                    "No paid traffic detected. Ecommerce businesses rarely scale on organic \
                     reach alone."
                        .to_string(),
                );
            }
            CompanyType::B2bServices | CompanyType::Saas => {
                d.adjust(-25);
                d.issue(
                    "channel-no-paid",
                    Severity::High,
                    "No paid acquisition",
                    "No paid traffic detected. A pipeline-driven business without paid \
                     channels is leaving demand capture to chance."
                        .to_string(),
                );
            }
            CompanyType::LocalService => {
                d.adjust(-15);
                d.issue(
                    "channel-no-paid",
                    Severity::Medium,
                    "No paid acquisition",
                    "No paid traffic detected. Local search ads are usually the fastest lever \
                     for a local service business."
                        .to_string(),
                );
            }
            CompanyType::Other | CompanyType::Unknown => {
                d.adjust(-10);
                d.issue(
                    "channel-no-paid",
                    Severity::Medium,
                    "No paid acquisition",
                    "No paid traffic detected across the measured channels.".to_string(),
                );
            }
        }
    } else if paid < THIN_PAID_SHARE
        && matches!(company_type, CompanyType::B2bServices | CompanyType::Saas)
    {
        d.adjust(-15);
        d.found(format!("paid share {:.1}%", paid * 100.0));
        d.issue(
            "channel-thin-paid",
            Severity::Medium,
            "Paid acquisition barely registers",
            format!(
                "Paid channels drive only {:.1}% of traffic — too thin to learn from or \
                 scale.",
                paid * 100.0
            ),
        );
    } else {
        d.found(format!("paid share {:.1}%", paid * 100.0));
    }

    if signals.tracking.has_retargeting {
        d.adjust(5);
        d.found("retargeting pixels");
    } else {
        d.adjust(-10);
        d.missing("retargeting pixels");
        d.issue(
            "channel-no-retargeting",
            Severity::Medium,
            "No retargeting in place",
            "No retargeting pixels detected; visitors who bounce are gone for good."
                .to_string(),
        );
    }

    let channel_count = snapshot.map(|s| s.channels.len()).unwrap_or(0);
    d.data_point("channel_count", channel_count as u64);
    if channel_count >= 4 {
        d.adjust(10);
        d.found(format!("{} active traffic channels", channel_count));
    } else if channel_count >= 2 {
        d.adjust(5);
        d.found(format!("{} active traffic channels", channel_count));
    }

    let summary = summary_line(
        &d,
        "Acquisition mix is broad and invested",
        "Acquisition mix exists but leans on too few channels",
        "Acquisition is effectively absent or invisible",
    );
    d.freeze(summary)
}

fn score_targeting(signals: &SignalSet, snapshot: Option<&AnalyticsSnapshot>) -> Dimension {
    let has_paid = paid_share(snapshot) > 0.0;
    let baseline = if has_paid {
        TARGETING_BASELINE
    } else {
        TARGETING_NO_PAID_BASELINE
    };
    let mut d = DimensionBuilder::new(DimensionKey::Targeting, baseline);

    if signals.landing.has_dedicated_landing_page {
        d.adjust(15);
        d.found(format!(
            "{} dedicated landing page(s)",
            signals.landing.count
        ));
    } else {
        d.missing("dedicated landing pages");
        d.issue(
            "targeting-no-dedicated-lp",
            Severity::Medium,
            "No dedicated landing pages",
            "Campaign traffic has nowhere to land except generic pages, so message match \
             is impossible."
                .to_string(),
        );
    }

    if has_paid && !signals.tracking.has_retargeting {
        d.adjust(-10);
        d.issue(
            "targeting-no-retargeting-layer",
            Severity::Medium,
            "Paid traffic without a retargeting layer",
            "Paid visitors are not being segmented for follow-up; every click is \
             one-shot."
                .to_string(),
        );
    }

    let summary = summary_line(
        &d,
        "Campaign traffic is routed to purpose-built pages",
        "Some targeting structure exists but it is incomplete",
        "Nothing suggests traffic is being deliberately targeted",
    );
    d.freeze(summary)
}

fn score_creative(signals: &SignalSet) -> Dimension {
    let mut d = DimensionBuilder::new(DimensionKey::Creative, CREATIVE_BASELINE);

    if !signals.landing.has_dedicated_landing_page {
        d.adjust(-10);
        d.missing("dedicated landing pages");
    }

    match &signals.cta.primary_cta {
        Some(primary) => {
            d.adjust(15);
            d.found(format!("primary CTA \"{}\"", primary));
        }
        None => {
            d.adjust(-15);
            d.missing("a primary call to action");
            d.issue(
                "creative-no-primary-cta",
                Severity::High,
                "No clear primary call to action",
                "No single CTA stands out across the site; visitors are never told what \
                 to do next."
                    .to_string(),
            );
        }
    }

    let clarity = signals.cta.clarity_score;
    d.data_point("cta_clarity", clarity);
    if clarity >= 80 {
        d.adjust(10);
    } else if clarity < 50 {
        d.issue(
            "creative-muddled-ctas",
            Severity::Medium,
            "Calls to action compete with each other",
            "CTA messaging is muddled enough that no single action reads as the intended \
             one."
                .to_string(),
        );
    }

    let summary = summary_line(
        &d,
        "Creative drives one clear action",
        "Creative is serviceable but the ask could be sharper",
        "Creative gives visitors no clear next step",
    );
    d.freeze(summary)
}

fn score_funnel(
    signals: &SignalSet,
    snapshot: Option<&AnalyticsSnapshot>,
    confidence: &DataConfidence,
    company_type: CompanyType,
) -> Dimension {
    let mut d = DimensionBuilder::new(DimensionKey::Funnel, FUNNEL_BASELINE);
    let volume = session_volume(snapshot);

    if signals.landing.has_lead_capture {
        d.found("lead capture form");
    } else {
        d.missing("lead capture forms");
        let (delta, severity) = match company_type {
            CompanyType::B2bServices | CompanyType::Saas => (-15, Severity::High),
            CompanyType::Ecommerce => (-5, Severity::Low),
            _ => (-10, Severity::Medium),
        };
        d.adjust(delta);
        d.issue(
            "funnel-no-lead-capture",
            severity,
            "No way to capture leads",
            "No page offers a form that captures contact details; interested visitors \
             have no next step short of buying."
                .to_string(),
        );
    }

    if signals.cta.primary_cta.is_some() {
        d.adjust(10);
        d.found("a primary CTA anchoring the funnel");
    } else {
        d.issue(
            "funnel-no-primary-cta",
            Severity::Medium,
            "Funnel has no anchor action",
            "Without a primary CTA the funnel has no defined entry point.".to_string(),
        );
    }

    if let Some(rate) = snapshot.and_then(|s| s.conversion_rate) {
        d.data_point("conversion_rate", rate);
        if volume >= BANDING_MIN_SESSIONS {
            apply_conversion_banding(&mut d, rate);
        }
        // Below the session floor the rate is recorded as evidence only.
    }

    if volume < BANDING_MIN_SESSIONS || confidence.is_low() {
        // Under-confidence ceiling: thin data never yields a strong funnel
        d.cap(FUNNEL_LOW_DATA_CAP);
    }

    let summary = summary_line(
        &d,
        "The funnel captures and converts demand",
        "The funnel works but leaks at known points",
        "The funnel is missing its basic plumbing",
    );
    d.freeze(summary)
}

/// Seven-bucket step function over the conversion-rate fraction
///
/// Interval edges are part of the behavioral contract: exactly 3% lands in
/// the good bucket, 0.4999% lands in poor.
fn apply_conversion_banding(d: &mut DimensionBuilder, rate: f64) {
    if rate < 0.005 {
        d.adjust(-10);
        d.issue(
            "funnel-poor-conversion",
            Severity::High,
            "Conversion rate is below viability",
            format!(
                "A conversion rate of {:.2}% means the funnel loses essentially everyone.",
                rate * 100.0
            ),
        );
    } else if rate < 0.03 {
        // Neutral band.
    } else if rate < 0.08 {
        d.adjust(5);
        d.found(format!("healthy conversion rate {:.1}%", rate * 100.0));
    } else if rate < 0.20 {
        d.adjust(10);
        d.found(format!("very strong conversion rate {:.1}%", rate * 100.0));
    } else if rate <= 0.40 {
        d.adjust(12);
        d.found(format!(
            "exceptionally strong conversion rate {:.1}%",
            rate * 100.0
        ));
    } else {
        d.adjust(-10);
        d.issue_in_category(
            "funnel-conversion-noise",
            DimensionKey::Measurement,
            Severity::Medium,
            "Conversion rate looks like tracking noise",
            format!(
                "A reported conversion rate of {:.0}% almost certainly means conversion \
                 events are misconfigured, not that the funnel converts.",
                rate * 100.0
            ),
        );
    }
}

fn score_measurement(signals: &SignalSet, confidence: &DataConfidence) -> Dimension {
    let mut d = DimensionBuilder::new(DimensionKey::Measurement, MEASUREMENT_BASELINE);

    if signals.tracking.has_conversion_tracking {
        d.adjust(10);
        d.found("conversion event tracking");
    } else {
        d.adjust(-20);
        d.missing("conversion event tracking");
        d.issue(
            "measurement-no-conversion-tracking",
            Severity::High,
            "Conversions are not tracked",
            "No conversion events detected; spend and content decisions are running \
             blind."
                .to_string(),
        );
    }

    match signals.tracking.utm_coverage {
        UtmCoverage::None => {
            d.adjust(-20);
            d.missing("UTM campaign tagging");
            d.issue(
                "measurement-no-utm",
                Severity::Medium,
                "No campaign tagging",
                "No UTM parameters anywhere; traffic sources cannot be attributed."
                    .to_string(),
            );
        }
        UtmCoverage::Partial => {
            d.adjust(-5);
            d.issue(
                "measurement-inconsistent-utm",
                Severity::Low,
                "Campaign tagging is inconsistent",
                "UTM parameters appear on some pages only; attribution will have holes."
                    .to_string(),
            );
        }
        UtmCoverage::Consistent => {
            d.adjust(10);
            d.found("consistent UTM tagging");
        }
    }

    if signals.tracking.has_analytics {
        d.adjust(5);
        d.found(format!(
            "analytics stack: {}",
            signals.tracking.vendors.join(", ")
        ));
    } else {
        d.adjust(-15);
        d.missing("an analytics platform");
        d.issue(
            "measurement-no-analytics",
            Severity::High,
            "No analytics platform installed",
            "No analytics platform detected on any crawled page.".to_string(),
        );
    }

    if confidence.is_low() {
        d.cap(MEASUREMENT_LOW_CONFIDENCE_CAP);
    }

    let summary = summary_line(
        &d,
        "Measurement is in place end to end",
        "Measurement exists but has gaps",
        "The site is effectively unmeasured",
    );
    d.freeze(summary)
}

/// Pick a summary line by the builder's current (pre-freeze) band
fn summary_line(d: &DimensionBuilder, strong: &str, moderate: &str, weak: &str) -> String {
    match DimensionStatus::from_score(d.score.clamp(0, 100) as u8) {
        DimensionStatus::Strong => strong.to_string(),
        DimensionStatus::Moderate => moderate.to_string(),
        DimensionStatus::Weak => weak.to_string(),
    }
}
