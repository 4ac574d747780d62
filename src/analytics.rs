//! # Analytics Snapshot Adapter
//!
//! This module is the seam between the pipeline and whatever reporting
//! backend a deployment wires in. The pipeline only ever sees a normalized
//! `AnalyticsSnapshot`; providers that are unconfigured or unreachable return
//! `None`, which downstream stages treat as "proceed with zero analytics
//! confidence" — never as an error.
//!
//! Raw provider payloads carry legacy field aliases (`paidShare` vs
//! `paidTrafficShare`) and the usual absent-vs-null ambiguity; both are
//! resolved here, in one normalization pass at the boundary, so internal
//! logic only deals in canonical optional fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Normalized traffic and conversion data for one site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Channel name to share of traffic. Shares are independently computed
    /// top-N values and need not sum to 1.
    pub traffic_mix: BTreeMap<String, f64>,

    /// Channel names, ordered by share
    pub channels: Vec<String>,

    /// Site-wide conversion rate as a fraction (not a percentage)
    pub conversion_rate: Option<f64>,

    /// Share of traffic from paid channels, as a fraction
    pub paid_share: Option<f64>,

    /// Total sessions in the reporting window
    pub session_volume: Option<u64>,

    /// Total conversions in the reporting window
    pub conversions: u64,
}

/// Raw provider payload, before normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub traffic_mix: BTreeMap<String, f64>,

    #[serde(default)]
    pub channels: Vec<String>,

    #[serde(default)]
    pub conversion_rate: Option<f64>,

    /// Canonical name plus the legacy alias some payloads still send
    #[serde(default, alias = "paidTrafficShare")]
    pub paid_share: Option<f64>,

    #[serde(default, alias = "sessions")]
    pub session_volume: Option<u64>,

    #[serde(default)]
    pub conversions: Option<u64>,
}

impl RawSnapshot {
    /// Normalize a raw payload into the canonical snapshot
    ///
    /// Non-finite or negative fractions are dropped rather than propagated. A
    /// conversion rate above 1.0 is kept — the scoring engine flags it as
    /// probable tracking noise — but logged here.
    pub fn normalize(self) -> AnalyticsSnapshot {
        let conversion_rate = self.conversion_rate.filter(|r| r.is_finite() && *r >= 0.0);
        if let Some(rate) = conversion_rate {
            if rate > 1.0 {
                warn!("Conversion rate {} > 1.0; upstream misconfiguration likely", rate);
            }
        }

        AnalyticsSnapshot {
            traffic_mix: self.traffic_mix,
            channels: self.channels,
            conversion_rate,
            paid_share: self.paid_share.filter(|s| s.is_finite() && *s >= 0.0),
            session_volume: self.session_volume,
            conversions: self.conversions.unwrap_or(0),
        }
    }
}

/// External analytics backend seam
///
/// Implementations must tolerate missing configuration by returning `None`
/// rather than failing.
#[allow(async_fn_in_trait)]
pub trait AnalyticsProvider {
    /// Fetch a snapshot for the given workspace, if the backend is configured
    async fn snapshot(&self, workspace: Option<&str>) -> Option<AnalyticsSnapshot>;
}

/// Provider for deployments with no analytics backend configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnalytics;

impl AnalyticsProvider for NoAnalytics {
    async fn snapshot(&self, _workspace: Option<&str>) -> Option<AnalyticsSnapshot> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_resolves_legacy_alias() {
        let raw: RawSnapshot = serde_json::from_str(
            r#"{"paidTrafficShare": 0.25, "sessions": 400, "conversionRate": 0.02}"#,
        )
        .unwrap();
        let snapshot = raw.normalize();

        assert_eq!(snapshot.paid_share, Some(0.25));
        assert_eq!(snapshot.session_volume, Some(400));
        assert_eq!(snapshot.conversion_rate, Some(0.02));
        assert_eq!(snapshot.conversions, 0);
    }

    #[test]
    fn test_normalize_drops_garbage_fractions() {
        let raw: RawSnapshot =
            serde_json::from_str(r#"{"conversionRate": -0.5, "paidShare": 0.1}"#).unwrap();
        let snapshot = raw.normalize();

        assert_eq!(snapshot.conversion_rate, None);
        assert_eq!(snapshot.paid_share, Some(0.1));
    }

    #[test]
    fn test_normalize_keeps_suspicious_rate_for_scoring() {
        // >1.0 is upstream misconfiguration; the scoring engine flags it, so
        // normalization must not silently erase it.
        let raw: RawSnapshot = serde_json::from_str(r#"{"conversionRate": 1.8}"#).unwrap();
        assert_eq!(raw.normalize().conversion_rate, Some(1.8));
    }

    #[tokio::test]
    async fn test_no_analytics_returns_none() {
        assert!(NoAnalytics.snapshot(None).await.is_none());
        assert!(NoAnalytics.snapshot(Some("ws-1")).await.is_none());
    }
}
