// src/error.rs
// =============================================================================
// Error types for the library.
//
// Only two kinds of failure ever reach the caller of a run:
// - MissingField: the input object was incomplete (nothing was fetched)
// - FallbackExhausted: the homepage and every allowed variant of it failed
//
// FetchError describes a single failed page. The crawl logs it and either
// recovers (homepage fallback) or drops the page; it never ends a run by itself.
//
// Rust concepts:
// - thiserror: #[error(...)] generates Display, #[from] generates From
// - Or-patterns with bindings: one arm pulls `url` out of every variant
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("missing required input field '{0}'")]
    MissingField(&'static str),

    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("all homepage fallbacks failed (last attempt {url}): {reason}")]
    FallbackExhausted { url: String, reason: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("{url}: timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url}: {message}")]
    Navigation { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Navigation { url, .. } => url,
        }
    }
}
