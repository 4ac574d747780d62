//! # Report Synthesis Module
//!
//! This module turns the scoring output into the human-facing layer of the
//! report: a prose narrative, a bounded list of quick wins, and a bounded
//! list of strategic projects.
//!
//! Quick wins are rule-template driven (each gated on a dimension scoring
//! below 60), sorted by impact and truncated to five AFTER sorting — showing
//! the best five is the policy, even when that silently drops lower-impact
//! wins. Projects keep insertion order instead: the weakest dimension leads,
//! the maturity-stage project follows, then up to two secondary weak
//! dimensions.

use serde::Serialize;

use crate::confidence::DataConfidence;
use crate::scoring::{Dimension, DimensionKey, DimensionStatus, MaturityStage, ScoringOutput, Severity};

/// Dimension score below which quick-win templates fire
const QUICK_WIN_THRESHOLD: u8 = 60;

/// Maximum surfaced quick wins and projects
const MAX_QUICK_WINS: usize = 5;
const MAX_PROJECTS: usize = 5;

/// Expected impact of a recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    fn rank(self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }
}

/// Effort required for a recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// A low-effort, high-leverage recommended action
#[derive(Debug, Clone, Serialize)]
pub struct QuickWin {
    /// Sequential id within the surfaced list
    pub id: String,

    /// Short action title
    pub title: String,

    /// What to do and why
    pub description: String,

    /// Expected impact
    pub impact: Impact,

    /// Required effort
    pub effort: EffortLevel,
}

/// A strategic project derived from the scoring output
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Sequential id within the surfaced list
    pub id: String,

    /// Short project title
    pub title: String,

    /// Scope description
    pub description: String,

    /// The dimension that motivated this project, if one did
    pub dimension: Option<DimensionKey>,
}

struct QuickWinTemplate {
    gate: DimensionKey,
    title: &'static str,
    description: &'static str,
    impact: Impact,
    effort: EffortLevel,
}

/// The fixed quick-win rule templates, each gated on one dimension
const QUICK_WIN_TEMPLATES: [QuickWinTemplate; 6] = [
    QuickWinTemplate {
        gate: DimensionKey::ChannelMix,
        title: "Launch retargeting on existing traffic",
        description: "Install a retargeting pixel and run a small follow-up campaign to the \
                      visitors you already get; it is the cheapest incremental channel available.",
        impact: Impact::High,
        effort: EffortLevel::Low,
    },
    QuickWinTemplate {
        gate: DimensionKey::Measurement,
        title: "Install conversion event tracking",
        description: "Define the one action that counts as a conversion and fire an event for \
                      it; every other measurement fix depends on this.",
        impact: Impact::High,
        effort: EffortLevel::Low,
    },
    QuickWinTemplate {
        gate: DimensionKey::Measurement,
        title: "Tag every campaign link with UTM parameters",
        description: "Adopt one UTM convention and apply it to every paid and outbound link so \
                      traffic sources stop blending together.",
        impact: Impact::Medium,
        effort: EffortLevel::Low,
    },
    QuickWinTemplate {
        gate: DimensionKey::Funnel,
        title: "Add a lead-capture form to high-traffic pages",
        description: "Give interested visitors a next step short of buying: a short form above \
                      the fold on the pages they actually visit.",
        impact: Impact::High,
        effort: EffortLevel::Medium,
    },
    QuickWinTemplate {
        gate: DimensionKey::Targeting,
        title: "Stand up one dedicated landing page",
        description: "Build a single campaign-specific landing page and point paid traffic at \
                      it instead of the homepage.",
        impact: Impact::Medium,
        effort: EffortLevel::Medium,
    },
    QuickWinTemplate {
        gate: DimensionKey::Creative,
        title: "Commit to a single primary call to action",
        description: "Pick one action, phrase it the same way everywhere, and demote every \
                      competing button.",
        impact: Impact::Medium,
        effort: EffortLevel::Low,
    },
];

/// Derive quick wins from the scoring output
///
/// Gating, then a stable sort by impact (high first), then truncation to
/// five. The truncation must run after the sort.
pub fn derive_quick_wins(scoring: &ScoringOutput) -> Vec<QuickWin> {
    let mut wins: Vec<&QuickWinTemplate> = QUICK_WIN_TEMPLATES
        .iter()
        .filter(|template| scoring.dimension(template.gate).score < QUICK_WIN_THRESHOLD)
        .collect();

    wins.sort_by_key(|template| template.impact.rank());

    wins.into_iter()
        .take(MAX_QUICK_WINS)
        .enumerate()
        .map(|(index, template)| QuickWin {
            id: format!("qw-{}", index + 1),
            title: template.title.to_string(),
            description: template.description.to_string(),
            impact: template.impact,
            effort: template.effort,
        })
        .collect()
}

fn project_for_dimension(key: DimensionKey) -> (&'static str, &'static str) {
    match key {
        DimensionKey::ChannelMix => (
            "Build a multi-channel acquisition engine",
            "Move from a single traffic source to two or three deliberately chosen channels \
             with budget, creative and measurement per channel.",
        ),
        DimensionKey::Targeting => (
            "Design a campaign-to-landing-page architecture",
            "Map every campaign to a purpose-built destination so audience, message and page \
             always match.",
        ),
        DimensionKey::Creative => (
            "Rebuild the conversion messaging system",
            "Define the offer, the proof and the single ask, then propagate that hierarchy \
             through every page and ad.",
        ),
        DimensionKey::Funnel => (
            "Engineer the lead capture and follow-up path",
            "Design the full journey from first visit to qualified conversation, including \
             forms, confirmation states and follow-up sequencing.",
        ),
        DimensionKey::Measurement => (
            "Stand up a full measurement foundation",
            "Analytics platform, conversion events and attribution tagging as one project, \
             so every later decision has data behind it.",
        ),
    }
}

fn project_for_stage(stage: MaturityStage) -> Option<(&'static str, &'static str)> {
    match stage {
        MaturityStage::Unproven => Some((
            "Prove one channel end to end",
            "Pick the single most plausible channel and run it properly for a quarter — \
             traffic, landing page, conversion tracking — before spreading effort further.",
        )),
        MaturityStage::Emerging => Some((
            "Double down on the first working channel",
            "One channel shows signs of life; concentrate budget and iteration there until \
             its economics are understood.",
        )),
        MaturityStage::Scaling => Some((
            "Systematize what already works",
            "Document and templatize the working playbook so new channels and campaigns \
             start from it rather than from scratch.",
        )),
        MaturityStage::Established => None,
    }
}

/// Derive strategic projects from the scoring output
///
/// Insertion order is the contract: weakest-dimension project first, then the
/// maturity-stage project, then up to two secondary weak dimensions. No
/// re-sorting.
pub fn derive_projects(scoring: &ScoringOutput) -> Vec<Project> {
    let mut entries: Vec<(Option<DimensionKey>, &'static str, &'static str)> = Vec::new();

    let weakest = weakest_dimension(scoring);
    let (title, description) = project_for_dimension(weakest.key);
    entries.push((Some(weakest.key), title, description));

    if let Some((title, description)) = project_for_stage(scoring.maturity) {
        entries.push((None, title, description));
    }

    let mut secondary = 0;
    for key in DimensionKey::ALL {
        if key == weakest.key || secondary >= 2 {
            continue;
        }
        let dimension = scoring.dimension(key);
        if dimension.status == DimensionStatus::Weak {
            let (title, description) = project_for_dimension(key);
            entries.push((Some(key), title, description));
            secondary += 1;
        }
    }

    entries
        .into_iter()
        .take(MAX_PROJECTS)
        .enumerate()
        .map(|(index, (dimension, title, description))| Project {
            id: format!("proj-{}", index + 1),
            title: title.to_string(),
            description: description.to_string(),
            dimension,
        })
        .collect()
}

/// The single lowest-scoring dimension, ties broken by canonical order
fn weakest_dimension(scoring: &ScoringOutput) -> &Dimension {
    scoring
        .dimensions
        .iter()
        .min_by_key(|d| d.score)
        .expect("all five dimensions are always present")
}

/// Compose the prose narrative for a report
pub fn compose_narrative(
    target: &str,
    scoring: &ScoringOutput,
    confidence: &DataConfidence,
) -> String {
    let stage_phrase = match scoring.maturity {
        MaturityStage::Unproven => "demand generation is still unproven",
        MaturityStage::Emerging => "a demand engine is emerging but unreliable",
        MaturityStage::Scaling => "demand generation is working and ready to scale",
        MaturityStage::Established => "demand generation is an established strength",
    };

    let strongest = scoring
        .dimensions
        .iter()
        .max_by_key(|d| d.score)
        .expect("dimensions present");
    let weakest = weakest_dimension(scoring);

    let high_issues = scoring
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::High)
        .count();

    let mut paragraphs = vec![
        format!(
            "{} scores {}/100 overall: {}.",
            target, scoring.overall_score, stage_phrase
        ),
        format!(
            "The strongest dimension is {} ({}); the weakest is {} ({}). {}",
            strongest.key.label(),
            strongest.score,
            weakest.key.label(),
            weakest.score,
            weakest.summary
        ),
        format!(
            "{} issue(s) were flagged, {} of them high severity.",
            scoring.issues.len(),
            high_issues
        ),
    ];

    if confidence.is_low() {
        paragraphs.push(format!(
            "Treat these scores as directional only — data confidence is low ({}).",
            confidence.reason
        ));
    }

    paragraphs.join("\n\n")
}
