//! Error types for enrichment
//!
//! Only run-fatal conditions surface here. Per-article fetch failures are
//! normalized into [`FetchOutcome`](crate::FetchOutcome) records instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an enrichment run.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Input file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file was not valid digest JSON.
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Enriched document could not be serialized.
    #[error("failed to serialize digest: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Output file could not be written.
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
