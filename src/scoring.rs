//! # Demand Scoring Module
//!
//! This module turns the extracted signals, the analytics snapshot and the
//! data-confidence estimate into the five-dimension demand-generation score.
//! It is the core of the pipeline and is fully deterministic: identical
//! inputs always produce identical scores, issues and maturity stage.
//!
//! ## Key Components
//!
//! - `DimensionKey`: the five fixed scoring axes
//! - `Dimension`: one scored axis with status, summary, issues and evidence
//! - `Issue`: a structured problem appended as a byproduct of score branches
//! - `ScoringOutput`: the five dimensions plus overall score and maturity
//! - `score_demand`: the engine entry point
//!
//! ## Scoring Model
//!
//! Each dimension starts from an explicit baseline, accumulates signed
//! adjustments from rule branches, and is hard-clamped to [0, 100]. The
//! company type changes which penalty branches apply in Channel Mix and
//! Funnel — identical raw signals score differently for a SaaS vendor than
//! for a local plumber, by design. Two ordered safety caps bound the overall
//! score: a weak acquisition pair (Channel Mix and Targeting both below 50)
//! caps it at 55, and low data confidence caps it at 65.

mod engine;

pub use engine::score_demand;

use serde::Serialize;
use std::collections::BTreeMap;

/// Declared business model of the analyzed company
///
/// Pre-normalized input from an upstream classifier; `Unknown` is a valid
/// value and selects the mildest penalty branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    B2bServices,
    LocalService,
    Ecommerce,
    Saas,
    Other,
    Unknown,
}

impl std::str::FromStr for CompanyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "b2b_services" | "b2b" => Ok(Self::B2bServices),
            "local_service" | "local" => Ok(Self::LocalService),
            "ecommerce" => Ok(Self::Ecommerce),
            "saas" => Ok(Self::Saas),
            "other" => Ok(Self::Other),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown company type '{}'", other)),
        }
    }
}

/// The five fixed scoring axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionKey {
    ChannelMix,
    Targeting,
    Creative,
    Funnel,
    Measurement,
}

impl DimensionKey {
    /// All keys in canonical order
    pub const ALL: [DimensionKey; 5] = [
        DimensionKey::ChannelMix,
        DimensionKey::Targeting,
        DimensionKey::Creative,
        DimensionKey::Funnel,
        DimensionKey::Measurement,
    ];

    /// Human-readable dimension label, used as the issue category
    pub fn label(self) -> &'static str {
        match self {
            DimensionKey::ChannelMix => "Channel Mix",
            DimensionKey::Targeting => "Targeting",
            DimensionKey::Creative => "Creative",
            DimensionKey::Funnel => "Funnel",
            DimensionKey::Measurement => "Measurement",
        }
    }
}

/// Status bands over a dimension score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionStatus {
    Weak,
    Moderate,
    Strong,
}

impl DimensionStatus {
    /// Band a clamped score: weak < 50, moderate 50-69, strong >= 70
    pub fn from_score(score: u8) -> Self {
        if score < 50 {
            DimensionStatus::Weak
        } else if score < 70 {
            DimensionStatus::Moderate
        } else {
            DimensionStatus::Strong
        }
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A structured problem surfaced by a scoring branch
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Stable slug identifying the rule that fired
    pub id: String,

    /// Human-readable dimension label this issue belongs to
    pub category: String,

    /// Severity of the issue
    pub severity: Severity,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,
}

/// Evidence backing a dimension score
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evidence {
    /// What the analysis found
    pub found: Vec<String>,

    /// What the analysis looked for and did not find
    pub missing: Vec<String>,

    /// Raw data points that fed the score
    pub data_points: BTreeMap<String, serde_json::Value>,
}

/// One scored dimension, frozen after construction
#[derive(Debug, Clone, Serialize)]
pub struct Dimension {
    /// Which axis this is
    pub key: DimensionKey,

    /// Clamped score, 0-100
    pub score: u8,

    /// Status band derived from the score
    pub status: DimensionStatus,

    /// One-line human summary
    pub summary: String,

    /// Issues raised while computing this dimension
    pub issues: Vec<Issue>,

    /// Evidence backing the score
    pub evidence: Evidence,
}

/// Maturity stage derived from the capped overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityStage {
    Unproven,
    Emerging,
    Scaling,
    Established,
}

impl MaturityStage {
    /// Band the capped overall score: <50, <70, <85, else established
    pub fn from_score(score: u8) -> Self {
        if score < 50 {
            MaturityStage::Unproven
        } else if score < 70 {
            MaturityStage::Emerging
        } else if score < 85 {
            MaturityStage::Scaling
        } else {
            MaturityStage::Established
        }
    }
}

/// The scoring engine's full output
#[derive(Debug, Clone, Serialize)]
pub struct ScoringOutput {
    /// The five dimensions, in canonical order
    pub dimensions: Vec<Dimension>,

    /// Rounded mean of the dimension scores, after safety caps
    pub overall_score: u8,

    /// Maturity stage derived from the overall score
    pub maturity: MaturityStage,

    /// Every issue from every dimension, flat, in dimension order
    pub issues: Vec<Issue>,
}

impl ScoringOutput {
    /// Look up a dimension by key
    pub fn dimension(&self, key: DimensionKey) -> &Dimension {
        self.dimensions
            .iter()
            .find(|d| d.key == key)
            .expect("all five dimensions are always present")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bands() {
        assert_eq!(DimensionStatus::from_score(0), DimensionStatus::Weak);
        assert_eq!(DimensionStatus::from_score(49), DimensionStatus::Weak);
        assert_eq!(DimensionStatus::from_score(50), DimensionStatus::Moderate);
        assert_eq!(DimensionStatus::from_score(69), DimensionStatus::Moderate);
        assert_eq!(DimensionStatus::from_score(70), DimensionStatus::Strong);
    }

    #[test]
    fn test_maturity_bands() {
        assert_eq!(MaturityStage::from_score(49), MaturityStage::Unproven);
        assert_eq!(MaturityStage::from_score(50), MaturityStage::Emerging);
        assert_eq!(MaturityStage::from_score(69), MaturityStage::Emerging);
        assert_eq!(MaturityStage::from_score(70), MaturityStage::Scaling);
        assert_eq!(MaturityStage::from_score(84), MaturityStage::Scaling);
        assert_eq!(MaturityStage::from_score(85), MaturityStage::Established);
    }

    #[test]
    fn test_company_type_parsing() {
        assert_eq!("saas".parse::<CompanyType>().unwrap(), CompanyType::Saas);
        assert_eq!(
            "b2b-services".parse::<CompanyType>().unwrap(),
            CompanyType::B2bServices
        );
        assert!("retail".parse::<CompanyType>().is_err());
    }
}
