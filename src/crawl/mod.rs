// src/crawl/mod.rs
// =============================================================================
// This module drives the crawl of one organization's website.
//
// Features:
// - Priority frontier (staff/team/contact pages first) under a hard page budget
// - Bounded number of concurrent fetches
// - Retention policy that prefers pages naming the target person
// - Homepage fallback: www subdomain, then plain http, then give up
//
// Submodules:
// - frontier: the queue of pages to visit and the page budget
// - retention: which emails from a page are kept, and the result set
// - fallback: what to try when the homepage is unreachable
// - controller: the run loop tying everything together
//
// Rust concepts:
// - pub use ... as ...: re-export under a clearer name (decide_retention)
// - async fn returning Result: the ? operator works across awaits
// =============================================================================

mod controller;
mod fallback;
mod frontier;
mod retention;

pub use controller::EmailFinder;
pub use fallback::{FallbackDecision, FallbackForm, FallbackState};
pub use frontier::{Frontier, QueuedRequest, RequestOrigin};
pub use retention::{decide as decide_retention, ResultSet, Retention};

use crate::error::FinderError;
use crate::fetch::HttpFetcher;
use crate::links::KeywordSets;
use crate::model::{CrawlBudget, EmailRecord, Target};

/// Searches `target`'s website over plain HTTP.
pub async fn find_emails(
    target: &Target,
    budget: CrawlBudget,
    keywords: KeywordSets,
) -> Result<EmailRecord, FinderError> {
    let fetcher = HttpFetcher::new(&budget)?;
    EmailFinder::new(fetcher, budget)
        .with_keywords(keywords)
        .run(target)
        .await
}
