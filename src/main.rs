//! # DemandLab CLI Application
//!
//! This module implements the command-line interface for the demandlab
//! pipeline, providing access to the analysis workflow through a set of
//! subcommands.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - `analyze`: run the full pipeline against a site and print the report
//! - `crawl`: run the crawl stage alone and print what was fetched
//!
//! ## Features
//!
//! - Configurable page budget and timeout
//! - Company-type selection for type-aware scoring
//! - Both JSON and text output formats, with optional file output
//! - Telemetry integration for monitoring

mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use demandlab::crawler::CrawlerConfig;
use demandlab::pipeline::Pipeline;
use demandlab::scoring::CompanyType;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Diagnose a website's demand-generation maturity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full analysis pipeline against a site
    Analyze(AnalyzeArgs),

    /// Run only the crawl stage and show what was fetched
    Crawl(CrawlArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// URL of the site to analyze
    #[arg(required = true)]
    url: String,

    /// Company type used for scoring
    #[arg(short, long, default_value = "unknown")]
    company_type: CompanyType,

    /// Maximum number of pages to crawl
    #[arg(short = 'p', long, default_value = "12")]
    max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Write the JSON report to a file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL of the site to crawl
    #[arg(required = true)]
    url: String,

    /// Maximum number of pages to crawl
    #[arg(short = 'p', long, default_value = "12")]
    max_pages: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _otel = telemetry::init_tracing_subscriber();

    match cli.command {
        Some(Commands::Analyze(args)) => {
            analyze_command(args).await?;
        }
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        None => {
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = CrawlerConfig::builder()
        .max_pages(args.max_pages)
        .fetch_timeout(Duration::from_secs(args.timeout))
        .build();

    let pipeline = Pipeline::with_provider(config, demandlab::analytics::NoAnalytics)?;
    let report = pipeline.run(&args.url, args.company_type, None).await?;

    if let Some(output_file) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(output_file, json)
            .await
            .with_context(|| format!("writing report to {}", output_file.display()))?;
        println!("Saved report to {}", output_file.display());
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", report.render_text()),
    }

    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    println!("Crawling {}...", args.url);

    let config = CrawlerConfig::builder().max_pages(args.max_pages).build();
    let client = demandlab::PageClient::with_options(&config.user_agent, config.fetch_timeout)?;
    let pages = demandlab::crawler::crawl_site(&client, &args.url, &config)
        .await
        .map_err(demandlab::Error::from)?;

    println!("Crawled {} pages", pages.len());
    for page in &pages {
        println!(
            "  {:<24} {:?}{}{}",
            page.path,
            page.page_type,
            if page.has_form { " [form]" } else { "" },
            if page.has_cta { " [cta]" } else { "" },
        );
    }

    Ok(())
}
