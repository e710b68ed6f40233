//! sprintlens CLI - project forecasting and health from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use sprintlens_analytics::AnalyticsEngine;
use sprintlens_core::{AnalysisSettings, Metric, RawObservation};
use sprintlens_source::{JsonFileSource, ObservationSource, TokenBucket};

#[derive(Parser)]
#[command(name = "sprintlens")]
#[command(about = "Burndown forecasting and project-health analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonOpts {
    /// Path to a JSON array of observation rows
    #[arg(long)]
    input: PathBuf,

    /// PERT selection width (best/worst weeks feeding the extremes)
    #[arg(long, default_value = "3.0")]
    pert_factor: f64,

    /// Project deadline (YYYY-MM-DD)
    #[arg(long)]
    deadline: Option<String>,

    /// Analysis window in most-recent ISO weeks (default: all data)
    #[arg(long)]
    weeks: Option<usize>,

    /// Estimated total item scope
    #[arg(long)]
    total_items: Option<f64>,

    /// Estimated total point scope
    #[arg(long)]
    total_points: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis report as JSON
    Report {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Burndown/burnup forecast lines
    Forecast {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Composite health score
    Health {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Scope baseline, creep, and stability
    Scope {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Velocity trend classification
    Trend {
        #[command(flatten)]
        opts: CommonOpts,
        /// Column to analyze
        #[arg(long, default_value = "completed_items")]
        metric: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { opts } => {
            let report = run_analysis(&opts).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Forecast { opts } => {
            let report = run_analysis(&opts).await?;
            let forecast = serde_json::json!({
                "burndown": report.burndown,
                "burnup": report.burnup,
                "estimate": report.estimate,
            });
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        Commands::Health { opts } => {
            let report = run_analysis(&opts).await?;
            println!("{}", serde_json::to_string_pretty(&report.health)?);
            info!(status = report.health.status.as_str(), "health computed");
        }
        Commands::Scope { opts } => {
            let report = run_analysis(&opts).await?;
            let scope = serde_json::json!({
                "baseline": report.baseline,
                "creep": report.scope_creep,
                "stability": report.scope_stability,
                "weekly_growth": report.weekly_growth,
            });
            println!("{}", serde_json::to_string_pretty(&scope)?);
        }
        Commands::Trend { opts, metric } => {
            let metric: Metric = metric
                .parse()
                .context("unknown metric column (expected one of the observation columns)")?;
            let records = load_records(&opts.input).await?;
            let buckets = sprintlens_analytics::aggregate_weekly(&records);
            let trend = sprintlens_analytics::TrendAnalyzer::default().analyze(&buckets, metric);
            println!("{}", serde_json::to_string_pretty(&trend)?);
        }
    }

    Ok(())
}

async fn run_analysis(opts: &CommonOpts) -> Result<sprintlens_core::AnalysisReport> {
    let records = load_records(&opts.input).await?;
    let settings = settings_from(opts)?;
    Ok(AnalyticsEngine::new(settings).analyze(&records))
}

async fn load_records(path: &PathBuf) -> Result<Vec<RawObservation>> {
    let limiter = Arc::new(TokenBucket::new(5, 1.0));
    let source = JsonFileSource::new(path, limiter);
    let records = source
        .fetch()
        .await
        .with_context(|| format!("failed to load observations from {}", path.display()))?;
    Ok(records)
}

fn settings_from(opts: &CommonOpts) -> Result<AnalysisSettings> {
    let deadline = opts
        .deadline
        .as_deref()
        .map(|raw| {
            raw.parse::<chrono::NaiveDate>()
                .with_context(|| format!("invalid deadline: {raw}"))
        })
        .transpose()?;

    Ok(AnalysisSettings {
        pert_factor: opts.pert_factor,
        deadline,
        weeks: opts.weeks,
        estimated_total_items: opts.total_items,
        estimated_total_points: opts.total_points,
        ..AnalysisSettings::default()
    })
}
