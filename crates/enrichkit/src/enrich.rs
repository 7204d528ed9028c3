//! Enrichment orchestration
//!
//! Drives one fetch per selected article under bounded concurrency.
//! Workers return outcomes rather than touching shared state; the
//! candidate collection is mutated only after every fetch has finished,
//! in original collection order, so the result is deterministic whatever
//! order the network completes in.

use std::collections::HashMap;

use futures::{stream, StreamExt};
use tracing::{debug, info};

use crate::error::EnrichError;
use crate::fetch::{fetch_full_text, http_client};
use crate::select::select_batch;
use crate::types::{Article, EnrichmentStats, FetchMethod, FetchOutcome};

/// Upper bound on in-flight fetches.
pub const MAX_CONCURRENT_FETCHES: usize = 5;

/// Tunables for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Minimum quality score for eligibility.
    pub min_score: i64,
    /// Batch size cap per run.
    pub max_articles: usize,
    /// Character budget per article.
    pub max_chars: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            min_score: 10,
            max_articles: 15,
            max_chars: 2000,
        }
    }
}

/// Enrich eligible articles in place and return aggregate counters.
///
/// Selection, bounded-concurrency fetching, then a single-threaded
/// application pass over the original collection. Per-article failures are
/// recorded in their outcomes and never abort the batch; the only fatal
/// condition is HTTP client construction.
pub async fn enrich_articles(
    mut articles: Vec<&mut Article>,
    opts: &EnrichOptions,
) -> Result<EnrichmentStats, EnrichError> {
    let batch = select_batch(
        articles.iter().map(|a| &**a),
        opts.min_score,
        opts.max_articles,
    );
    if batch.is_empty() {
        info!("no articles eligible for enrichment");
        return Ok(EnrichmentStats::default());
    }

    let attempted = batch.len();
    info!(
        count = attempted,
        min_score = opts.min_score,
        "enriching articles"
    );

    let client = http_client()?;
    let max_chars = opts.max_chars;

    // Completion order is non-deterministic; keying by URL makes the
    // application pass below independent of network timing.
    let outcomes: HashMap<String, FetchOutcome> = stream::iter(batch)
        .map(|url| {
            let client = client.clone();
            async move {
                let outcome = fetch_full_text(&client, &url, max_chars).await;
                (url, outcome)
            }
        })
        .buffer_unordered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

    let mut stats = EnrichmentStats {
        attempted,
        ..Default::default()
    };
    for (url, outcome) in &outcomes {
        if outcome.is_success() {
            stats.success += 1;
            if outcome.method == FetchMethod::CfMarkdown {
                stats.cf_markdown += 1;
            }
            debug!(method = %outcome.method, tokens = outcome.tokens, url = %url, "enriched");
        } else {
            debug!(
                method = %outcome.method,
                error = outcome.error.as_deref().unwrap_or(""),
                url = %url,
                "not enriched"
            );
        }
    }

    for article in articles.iter_mut() {
        let Some(outcome) = outcomes.get(article.link()) else {
            continue;
        };
        if outcome.is_success() {
            article.full_text = Some(outcome.text.clone());
            article.full_text_method = Some(outcome.method.as_str().to_string());
            article.full_text_tokens = Some(outcome.tokens);
        }
    }

    info!(
        success = stats.success,
        attempted = stats.attempted,
        cf_markdown = stats.cf_markdown,
        "enrichment complete"
    );
    Ok(stats)
}
