//! Enrichkit - full-text enrichment for scored article digests
//!
//! This crate selects a bounded batch of high-scoring articles from a
//! digest document and attaches extracted full text to each, using a
//! tiered acquisition strategy:
//!
//! 1. Structured markdown negotiation (`Accept: text/markdown`) - servers
//!    that support it return ready-to-use text directly
//! 2. Streaming HTML-to-text extraction - the fallback for everyone else
//! 3. Skip - deny-listed hosts and paywalled/JS-rendered shells
//!
//! Fetches run under bounded concurrency with strict per-request timeouts;
//! per-article failures are normalized into [`FetchOutcome`] records and
//! never abort a batch.

pub mod document;
pub mod domains;
pub mod enrich;
mod error;
pub mod extract;
pub mod fetch;
pub mod select;
mod types;

pub use document::{Digest, EnrichmentSummary, TopicEntry};
pub use enrich::{enrich_articles, EnrichOptions, MAX_CONCURRENT_FETCHES};
pub use error::EnrichError;
pub use extract::extract_readable_text;
pub use fetch::{fetch_full_text, http_client, FETCH_TIMEOUT};
pub use select::{select_batch, BLOG_MIN_SCORE};
pub use types::{Article, EnrichmentStats, FetchMethod, FetchOutcome};

/// Identifying User-Agent sent with every fetch.
pub const DEFAULT_USER_AGENT: &str = "enrichkit/0.1 (article enrichment)";
