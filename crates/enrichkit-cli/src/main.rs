//! Enrichkit CLI - enrich digest articles with extracted full text

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use enrichkit::{enrich_articles, Digest, EnrichError, EnrichOptions, EnrichmentSummary};

/// Enrich high-scoring digest articles with full text content
#[derive(Parser, Debug)]
#[command(name = "enrichkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input merged digest JSON
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output enriched JSON (default: overwrite input)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Minimum quality score for eligibility
    #[arg(long, default_value_t = 10)]
    min_score: i64,

    /// Maximum articles fetched per run
    #[arg(long, default_value_t = 15)]
    max_articles: usize,

    /// Character budget per article
    #[arg(long, default_value_t = 2000)]
    max_chars: usize,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Accepted and ignored, for pipeline compatibility
    #[arg(long, hide = true)]
    force: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("enrichment failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), EnrichError> {
    let output = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    let mut digest = Digest::from_path(&cli.input)?;

    let opts = EnrichOptions {
        min_score: cli.min_score,
        max_articles: cli.max_articles,
        max_chars: cli.max_chars,
    };

    let started = Instant::now();
    let stats = enrich_articles(digest.articles_mut().collect(), &opts).await?;
    let elapsed_s = round_to_tenth(started.elapsed().as_secs_f64());

    digest.enrichment = Some(EnrichmentSummary {
        timestamp: Utc::now().to_rfc3339(),
        attempted: stats.attempted,
        success: stats.success,
        cf_markdown: stats.cf_markdown,
        elapsed_s,
        min_score: cli.min_score,
        max_chars: cli.max_chars,
    });

    // Written only after the full run completes; a failed run leaves the
    // input untouched.
    digest.write_to_path(&output)?;

    info!(
        success = stats.success,
        attempted = stats.attempted,
        elapsed_s,
        output = %output.display(),
        "done"
    );
    Ok(())
}

fn round_to_tenth(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
