//! # Pipeline Orchestrator
//!
//! This module wires the stages together for one analysis run: the crawl and
//! the analytics fetch run concurrently (they have no ordering dependency),
//! then the signal extractors run over the final page list, then confidence,
//! scoring and synthesis. Stage outputs are merged sequentially afterwards —
//! no stage shares mutable state with another.
//!
//! The run degrades instead of failing: an unreachable site or an
//! unconfigured analytics backend produces a valid low-confidence "unproven"
//! report. The only hard error is a base URL the crawler cannot use.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::analytics::{AnalyticsProvider, AnalyticsSnapshot, NoAnalytics};
use crate::confidence::{DataConfidence, estimate_confidence};
use crate::crawler::{CrawlerConfig, crawl_site};
use crate::error::Result;
use crate::findings::{DemandLabFindings, merge_findings};
use crate::http::PageClient;
use crate::report::{Project, QuickWin, compose_narrative, derive_projects, derive_quick_wins};
use crate::scoring::{CompanyType, ScoringOutput, score_demand};
use crate::signals::{SignalSet, extract_signals};

/// The full output of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct DemandLabReport {
    /// The analyzed site
    pub target: String,

    /// Declared business model used for scoring
    pub company_type: CompanyType,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// How many pages the crawl produced
    pub pages_crawled: usize,

    /// The four signal bundles
    pub signals: SignalSet,

    /// The analytics snapshot, if a backend was configured
    pub analytics: Option<AnalyticsSnapshot>,

    /// How much to trust the scores
    pub confidence: DataConfidence,

    /// The five-dimension scoring output
    pub scoring: ScoringOutput,

    /// Prose narrative
    pub narrative: String,

    /// Top quick wins, impact-sorted, at most five
    pub quick_wins: Vec<QuickWin>,

    /// Strategic projects, insertion-ordered, at most five
    pub projects: Vec<Project>,

    /// Findings rollup for report UIs
    pub findings: DemandLabFindings,
}

impl DemandLabReport {
    /// Render the report as plain text for terminal output
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Demand report for {} ({:?} maturity, {}/100)\n\n",
            self.target, self.scoring.maturity, self.scoring.overall_score
        ));
        out.push_str(&self.narrative);
        out.push_str("\n\nDimensions:\n");
        for dimension in &self.scoring.dimensions {
            out.push_str(&format!(
                "  {:<12} {:>3}  {}\n",
                dimension.key.label(),
                dimension.score,
                dimension.summary
            ));
        }
        if !self.quick_wins.is_empty() {
            out.push_str("\nQuick wins:\n");
            for win in &self.quick_wins {
                out.push_str(&format!("  [{:?}] {}\n", win.impact, win.title));
            }
        }
        if !self.projects.is_empty() {
            out.push_str("\nProjects:\n");
            for project in &self.projects {
                out.push_str(&format!("  - {}\n", project.title));
            }
        }
        out
    }
}

/// The analysis pipeline, configured once and run per target
pub struct Pipeline<P = NoAnalytics> {
    client: PageClient,
    config: CrawlerConfig,
    provider: P,
}

impl Pipeline<NoAnalytics> {
    /// Pipeline with default configuration and no analytics backend
    pub fn new() -> Result<Self> {
        Self::with_provider(CrawlerConfig::default(), NoAnalytics)
    }
}

impl<P: AnalyticsProvider> Pipeline<P> {
    /// Pipeline with a custom crawl configuration and analytics provider
    pub fn with_provider(config: CrawlerConfig, provider: P) -> Result<Self> {
        let client = PageClient::with_options(&config.user_agent, config.fetch_timeout)?;
        Ok(Self {
            client,
            config,
            provider,
        })
    }

    /// Run the full analysis against one site
    #[instrument(skip(self), fields(company_type = ?company_type))]
    pub async fn run(
        &self,
        base_url: &str,
        company_type: CompanyType,
        workspace: Option<&str>,
    ) -> Result<DemandLabReport> {
        // The crawl and the analytics fetch are independent; everything after
        // needs both to have completed.
        let (pages, snapshot) = tokio::join!(
            crawl_site(&self.client, base_url, &self.config),
            self.provider.snapshot(workspace),
        );
        let pages = pages?;
        info!(
            "Analyzing {} with {} pages, analytics {}",
            base_url,
            pages.len(),
            if snapshot.is_some() { "present" } else { "absent" }
        );

        let signals = extract_signals(&pages);
        let confidence = estimate_confidence(snapshot.as_ref(), pages.len());
        let scoring = score_demand(&signals, snapshot.as_ref(), &confidence, company_type);
        let quick_wins = derive_quick_wins(&scoring);
        let projects = derive_projects(&scoring);
        let findings = merge_findings(&pages, &signals, snapshot.as_ref());
        let narrative = compose_narrative(base_url, &scoring, &confidence);

        Ok(DemandLabReport {
            target: base_url.to_string(),
            company_type,
            generated_at: Utc::now(),
            pages_crawled: pages.len(),
            signals,
            analytics: snapshot,
            confidence,
            scoring,
            narrative,
            quick_wins,
            projects,
            findings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceLevel;
    use crate::scoring::MaturityStage;
    use mockito::{Server, ServerGuard};

    /// Analytics provider returning a canned snapshot, for tests
    struct FixedAnalytics(AnalyticsSnapshot);

    impl AnalyticsProvider for FixedAnalytics {
        async fn snapshot(&self, _workspace: Option<&str>) -> Option<AnalyticsSnapshot> {
            Some(self.0.clone())
        }
    }

    fn pad(body: &str, to: usize) -> String {
        let mut out = body.to_string();
        while out.len() < to {
            out.push_str("<p>supporting copy that pads the page past the size floor</p>");
        }
        out
    }

    fn pipeline_for_test() -> Pipeline {
        // Empty probe list keeps the mock surface small; the key-link stage
        // is what this scenario exercises.
        let config = CrawlerConfig::builder().probe_paths(vec![]).build();
        Pipeline::with_provider(config, NoAnalytics).unwrap()
    }

    /// Three-page SaaS site: homepage with a "Get Started" CTA and a contact
    /// form, a pricing page with no CTA, and a demo page with a "Request
    /// Demo" CTA.
    async fn saas_site() -> ServerGuard {
        let mut server = Server::new_async().await;
        let homepage = pad(
            r#"<html><head><title>Acme</title></head><body>
                <h1>Ship faster with Acme</h1>
                <button>Get Started</button>
                <form action="/contact"><input type="email"><input type="submit"></form>
                <a href="/pricing">Pricing</a>
                <a href="/demo">Demo</a>
            </body></html>"#,
            600,
        );
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body(&homepage)
            .create_async()
            .await;
        server
            .mock("GET", "/pricing")
            .with_status(200)
            .with_body(pad("<html><body><h2>Plans</h2></body></html>", 600))
            .create_async()
            .await;
        server
            .mock("GET", "/demo")
            .with_status(200)
            .with_body(pad(
                "<html><body><h1>See Acme in action</h1><button>Request Demo</button></body></html>",
                600,
            ))
            .create_async()
            .await;
        server
    }

    #[tokio::test]
    async fn test_saas_scenario_end_to_end() {
        let server = saas_site().await;
        let pipeline = pipeline_for_test();
        let report = pipeline
            .run(&server.url(), CompanyType::Saas, None)
            .await
            .unwrap();

        assert_eq!(report.pages_crawled, 3);

        // Demo beats trial regardless of which CTA came first
        assert_eq!(report.signals.cta.primary_cta.as_deref(), Some("Request Demo"));
        assert!(report.signals.landing.has_lead_capture);

        // No analytics: confidence is low and the maturity stage sits at the
        // bottom of the ladder
        assert_eq!(report.confidence.level, ConfidenceLevel::Low);
        assert!(matches!(
            report.scoring.maturity,
            MaturityStage::Unproven | MaturityStage::Emerging
        ));
        assert!(report.scoring.overall_score <= 65);

        for dimension in &report.scoring.dimensions {
            assert!(dimension.score <= 100);
        }

        // The report must serialize for the JSON surface
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"primary_cta\":\"Request Demo\""));
    }

    #[tokio::test]
    async fn test_unreachable_site_yields_valid_unproven_report() {
        let pipeline = pipeline_for_test();
        let report = pipeline
            .run("http://127.0.0.1:1/", CompanyType::Unknown, None)
            .await
            .unwrap();

        assert_eq!(report.pages_crawled, 0);
        assert_eq!(report.confidence.level, ConfidenceLevel::Low);
        assert_eq!(report.scoring.maturity, MaturityStage::Unproven);
        // Channel mix lands on its zero-traffic floor minus the standing
        // penalties
        assert_eq!(
            report.scoring.dimension(crate::scoring::DimensionKey::ChannelMix).score,
            10
        );
    }

    #[tokio::test]
    async fn test_empty_input_is_deterministic() {
        let pipeline = pipeline_for_test();
        let first = pipeline
            .run("http://127.0.0.1:1/", CompanyType::Saas, None)
            .await
            .unwrap();
        let second = pipeline
            .run("http://127.0.0.1:1/", CompanyType::Saas, None)
            .await
            .unwrap();

        assert_eq!(first.scoring.overall_score, second.scoring.overall_score);
        assert_eq!(first.scoring.issues.len(), second.scoring.issues.len());
        assert_eq!(first.quick_wins.len(), second.quick_wins.len());
    }

    #[tokio::test]
    async fn test_analytics_provider_joins_scoring_input() {
        let server = saas_site().await;
        let snapshot = AnalyticsSnapshot {
            conversion_rate: Some(0.04),
            paid_share: Some(0.25),
            session_volume: Some(5000),
            channels: vec![
                "organic".to_string(),
                "paid".to_string(),
                "referral".to_string(),
                "email".to_string(),
            ],
            ..Default::default()
        };
        let config = CrawlerConfig::builder().probe_paths(vec![]).build();
        let pipeline = Pipeline::with_provider(config, FixedAnalytics(snapshot)).unwrap();

        let report = pipeline
            .run(&server.url(), CompanyType::Saas, None)
            .await
            .unwrap();

        // Analytics lifts confidence out of low, which releases the overall
        // cap
        assert_ne!(report.confidence.level, ConfidenceLevel::Low);
        assert!(report.analytics.is_some());

        let without_analytics = pipeline_for_test()
            .run(&server.url(), CompanyType::Saas, None)
            .await
            .unwrap();
        assert!(report.scoring.overall_score >= without_analytics.scoring.overall_score);
    }
}
