// src/crawl/retention.rs
// =============================================================================
// Which emails from a page make it into the run's result.
//
// Per page:
// - name found and on-domain emails present   -> keep them all
// - no name, but nothing kept so far          -> keep them all (fallback seed)
// - otherwise                                 -> keep nothing
//
// Nothing is ever removed. A fallback seed taken from the first page stays in
// the result even when a later page confirms the person's name.
//
// Rust concepts:
// - Enums with data: the decision carries the emails it keeps
// - Or-patterns: `A(x) | B(x) => x` handles both keeping variants at once
// - Vec + HashSet: keeps first-seen order and O(1) duplicate checks
// =============================================================================

use std::collections::HashSet;

use crate::extract::is_domain_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retention {
    NameConfirmed(Vec<String>),
    FallbackSeed(Vec<String>),
    Skip,
}

impl Retention {
    pub fn into_emails(self) -> Vec<String> {
        match self {
            Retention::NameConfirmed(emails) | Retention::FallbackSeed(emails) => emails,
            Retention::Skip => Vec::new(),
        }
    }
}

pub fn decide(domain_emails: Vec<String>, name_found: bool, result_set_empty: bool) -> Retention {
    if domain_emails.is_empty() {
        Retention::Skip
    } else if name_found {
        Retention::NameConfirmed(domain_emails)
    } else if result_set_empty {
        Retention::FallbackSeed(domain_emails)
    } else {
        Retention::Skip
    }
}

/// Emails retained during a run: unique, in first-seen order, never shrinking.
///
/// Owned by the run loop. Addresses outside the target domain are refused.
#[derive(Debug, Clone)]
pub struct ResultSet {
    domain: String,
    emails: Vec<String>,
    seen: HashSet<String>,
}

impl ResultSet {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            emails: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn add_if_absent(&mut self, email: String) -> bool {
        if !is_domain_email(&email, &self.domain) || self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.emails.push(email);
        true
    }

    // Returns how many of the emails were new
    pub fn extend(&mut self, emails: Vec<String>) -> usize {
        emails
            .into_iter()
            .filter(|email| self.add_if_absent(email.clone()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.emails.clone()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.emails
    }
}
