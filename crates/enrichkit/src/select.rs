//! Candidate selection for an enrichment batch

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::domains;
use crate::types::Article;

/// Reduced score floor for allow-listed blog hosts.
pub const BLOG_MIN_SCORE: i64 = 3;

/// Build the fetch work list from the full candidate collection.
///
/// An article is eligible when it has a link, has not been enriched yet,
/// and scores at least `min_score` (or [`BLOG_MIN_SCORE`] for allow-listed
/// blog hosts). Eligible links are deduplicated keeping the first
/// occurrence, stably sorted by descending score, and truncated to
/// `max_articles`. An empty result is a valid outcome.
pub fn select_batch<'a, I>(articles: I, min_score: i64, max_articles: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut batch: Vec<(i64, &str)> = Vec::new();

    for article in articles {
        let link = article.link();
        if link.is_empty() || article.is_enriched() {
            continue;
        }

        let score = article.quality_score();
        if score < min_score {
            let host = domains::host_for_url(link);
            if !(domains::is_blog(&host) && score >= BLOG_MIN_SCORE) {
                continue;
            }
        }

        if seen.insert(link) {
            batch.push((score, link));
        }
    }

    // Vec::sort_by_key is stable, so ties keep their original order.
    batch.sort_by_key(|(score, _)| Reverse(*score));
    batch.truncate(max_articles);
    batch.into_iter().map(|(_, link)| link.to_string()).collect()
}
