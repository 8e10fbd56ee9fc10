// src/links/mod.rs
// =============================================================================
// Deciding which discovered links are worth a page of our small budget.
//
// Submodules:
// - keywords: the GOOD / BAD / PRIORITY word lists (configuration data)
// - classifier: turns (href, anchor text) into a LinkTier
//
// Rust concepts:
// - Modules: keywords and classifier stay private; their types are re-exported
// =============================================================================

mod classifier;
mod keywords;

pub use classifier::{dedup_by_href, LinkClassifier, LinkDecision, LinkTier};
pub use keywords::KeywordSets;
