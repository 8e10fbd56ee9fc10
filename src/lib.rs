// src/lib.rs
// =============================================================================
// email-scout: find a person's email address by crawling their
// organization's website.
//
// Modules:
// - model: Target, CrawlBudget and the output EmailRecord
// - error: the library's error types
// - extract: email extraction and name detection (pure functions)
// - links: keyword sets and the link classifier
// - fetch: the page-fetch collaborator trait and its HTTP implementation
// - crawl: frontier, retention, homepage fallback and the run loop
//
// Rust concepts:
// - Library + binary in one package: main.rs uses the crate like any other user
// =============================================================================

pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod links;
pub mod model;

pub use crawl::{find_emails, EmailFinder};
pub use error::{FetchError, FinderError};
pub use model::{CrawlBudget, EmailRecord, RawInput, Target};
