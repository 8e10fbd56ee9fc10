// src/extract/mod.rs
// =============================================================================
// Page analysis that needs no network:
// - email: finds email-shaped strings in raw markup and splits them by domain
// - name: checks whether every part of the target's name appears in the text
//
// Both are pure functions over strings so the crawl controller can call them
// synchronously as soon as a page arrives.
//
// Rust concepts:
// - Modules: email and name are private; `pub use` picks the public API
// =============================================================================

mod email;
mod name;

pub use email::{extract_emails, is_domain_email, partition_by_domain, DomainEmails};
pub use name::contains_name;
