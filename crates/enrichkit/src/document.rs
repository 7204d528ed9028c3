//! Digest document model
//!
//! The digest is a JSON document with a `topics` mapping; each topic is
//! either `{"articles": [...]}` or a bare article list. Topic order defines
//! candidate order, so the mapping is an [`IndexMap`] and unknown fields
//! everywhere are preserved round-trip.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EnrichError;
use crate::types::Article;

/// A merged article digest, as produced by the upstream collection stages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Digest {
    /// Topic name to articles, in document order.
    #[serde(default)]
    pub topics: IndexMap<String, TopicEntry>,

    /// Summary block written after an enrichment run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentSummary>,

    /// All other top-level fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One value of the `topics` mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopicEntry {
    /// `{"articles": [...], ...}` form.
    Grouped {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        articles: Vec<Article>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Bare article list form.
    Bare(Vec<Article>),
    /// Anything else, preserved but contributing no candidates.
    Other(Value),
}

impl TopicEntry {
    /// Articles contributed by this topic, in list order.
    pub fn articles(&self) -> &[Article] {
        match self {
            TopicEntry::Grouped { articles, .. } => articles,
            TopicEntry::Bare(articles) => articles,
            TopicEntry::Other(_) => &[],
        }
    }

    fn articles_mut(&mut self) -> &mut [Article] {
        match self {
            TopicEntry::Grouped { articles, .. } => articles,
            TopicEntry::Bare(articles) => articles,
            TopicEntry::Other(_) => &mut [],
        }
    }
}

/// Run summary attached to the document root after enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    /// ISO-8601 UTC completion time.
    pub timestamp: String,
    pub attempted: usize,
    pub success: usize,
    pub cf_markdown: usize,
    /// Wall-clock seconds, one decimal.
    pub elapsed_s: f64,
    pub min_score: i64,
    pub max_chars: usize,
}

impl Digest {
    /// Read and parse a digest file.
    pub fn from_path(path: &Path) -> Result<Self, EnrichError> {
        let raw = fs::read_to_string(path).map_err(|source| EnrichError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| EnrichError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize and write the digest, pretty-printed.
    pub fn write_to_path(&self, path: &Path) -> Result<(), EnrichError> {
        let json = serde_json::to_string_pretty(self).map_err(EnrichError::Serialize)?;
        fs::write(path, json).map_err(|source| EnrichError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All articles across all topics: topic order, then list order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.topics.values().flat_map(|t| t.articles().iter())
    }

    /// Mutable view of all articles, same order as [`Digest::articles`].
    pub fn articles_mut(&mut self) -> impl Iterator<Item = &mut Article> {
        self.topics
            .values_mut()
            .flat_map(|t| t.articles_mut().iter_mut())
    }
}
