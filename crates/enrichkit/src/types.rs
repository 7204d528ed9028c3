//! Core types for article enrichment

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound on stored fetch error descriptions.
const MAX_ERROR_CHARS: usize = 100;

/// One content item under consideration for enrichment.
///
/// Unknown fields are preserved round-trip in `extra` so the enriched
/// document keeps everything upstream stages wrote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    /// Canonical URL, also the identity key. Absent or empty means the
    /// article can never be enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Score assigned by upstream ranking; consumed here, never computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<i64>,

    /// Extracted full text, present once enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    /// Acquisition method that produced `full_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_method: Option<String>,

    /// Token count reported or estimated for `full_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_tokens: Option<u64>,

    /// All other fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// The identity link, empty when absent.
    pub fn link(&self) -> &str {
        self.link.as_deref().unwrap_or("")
    }

    /// The quality score, defaulting to 0.
    pub fn quality_score(&self) -> i64 {
        self.quality_score.unwrap_or(0)
    }

    /// True once the article carries non-empty full text.
    pub fn is_enriched(&self) -> bool {
        self.full_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// How a fetch attempt concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMethod {
    /// Server returned the structured markdown representation directly.
    CfMarkdown,
    /// Plain text extracted from an HTML body.
    HtmlExtract,
    /// HTML fetched but the extraction was too short to be an article.
    HtmlTooShort,
    /// Deny-listed host, no request issued.
    Skipped,
    /// Transport failure, non-2xx status, or decode failure.
    Error,
}

impl FetchMethod {
    /// Wire name, as stored in `full_text_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMethod::CfMarkdown => "cf-markdown",
            FetchMethod::HtmlExtract => "html-extract",
            FetchMethod::HtmlTooShort => "html-too-short",
            FetchMethod::Skipped => "skipped",
            FetchMethod::Error => "error",
        }
    }
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized result of one fetch attempt. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Extracted or fetched text, empty unless the attempt succeeded.
    pub text: String,
    /// How the attempt concluded.
    pub method: FetchMethod,
    /// Server-declared or estimated token count for `text`.
    pub tokens: u64,
    /// Failure or rejection description, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchOutcome {
    /// Outcome for a deny-listed host. No request was made.
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            method: FetchMethod::Skipped,
            tokens: 0,
            error: Some(reason.into()),
        }
    }

    /// Outcome for a failed attempt. The description is truncated to
    /// [`MAX_ERROR_CHARS`] characters.
    pub fn error(description: impl Into<String>) -> Self {
        let mut description = description.into();
        if let Some((idx, _)) = description.char_indices().nth(MAX_ERROR_CHARS) {
            description.truncate(idx);
        }
        Self {
            text: String::new(),
            method: FetchMethod::Error,
            tokens: 0,
            error: Some(description),
        }
    }

    /// True when the attempt produced usable text.
    pub fn is_success(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Aggregate counters for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Fetches dispatched.
    pub attempted: usize,
    /// Fetches that produced non-empty text.
    pub success: usize,
    /// Successes that came through the markdown path.
    pub cf_markdown: usize,
}
