// src/model.rs
// =============================================================================
// Data types shared by every part of the crawl.
//
// - RawInput: the structured object handed to us at the process boundary
// - Target: the validated person + organization domain we are looking for
// - CrawlBudget: the fixed limits of a run (pages, concurrency, timeout)
// - EmailRecord: the one record produced at the end of a run
//
// Rust concepts:
// - Option<String> fields: serde leaves a missing field as None instead of failing
// - #[serde(default)]: missing budget fields fall back to Default::default()
// - Result<Self, FinderError>: constructors that validate return Result
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::FinderError;

// The input object exactly as it arrives (both fields optional so we can
// report which one is missing instead of a generic JSON error)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub full_name: Option<String>,
    pub domain: Option<String>,
}

/// The person and organization a run is searching for.
///
/// Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub full_name: String,
    pub domain: String,
    name_parts: Vec<String>,
}

impl Target {
    /// Builds a target, rejecting an empty name or domain.
    pub fn new(full_name: &str, domain: &str) -> Result<Self, FinderError> {
        let full_name = full_name.trim();
        let domain = domain.trim();

        if full_name.is_empty() {
            return Err(FinderError::MissingField("fullName"));
        }
        if domain.is_empty() {
            return Err(FinderError::MissingField("domain"));
        }

        let name_parts = full_name
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(Self {
            full_name: full_name.to_string(),
            domain: domain.to_string(),
            name_parts,
        })
    }

    /// Validates the raw input object.
    pub fn from_input(input: RawInput) -> Result<Self, FinderError> {
        let full_name = input
            .full_name
            .ok_or(FinderError::MissingField("fullName"))?;
        let domain = input.domain.ok_or(FinderError::MissingField("domain"))?;
        Self::new(&full_name, &domain)
    }

    /// Lowercase whitespace-separated tokens of the full name.
    pub fn name_parts(&self) -> &[String] {
        &self.name_parts
    }

    // The first URL of every run
    pub fn seed_url(&self) -> String {
        format!("https://{}", self.domain)
    }
}

/// Limits fixed at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrawlBudget {
    pub max_pages: usize,
    pub max_concurrency: usize,
    pub per_page_timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for CrawlBudget {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_concurrency: 2,
            per_page_timeout_seconds: 10,
            max_retries: 0,
        }
    }
}

impl CrawlBudget {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.per_page_timeout_seconds)
    }

    // A concurrency of zero would never dispatch anything
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

/// The single output record of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    pub full_name: String,
    pub domain: String,
    /// Unique, in the order they were first retained
    pub emails: Vec<String>,
}
