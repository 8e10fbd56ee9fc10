// src/links/classifier.rs
// =============================================================================
// Link classification.
//
// Pipeline for one link, in order:
// 1. Reject if the href does not contain the target domain, or contains "mailto"
// 2. good = any GOOD keyword in the lowercased href or anchor text
// 3. bad  = any BAD keyword in the lowercased href or anchor text
// 4. Rejected if !good || bad, else HighPriority if a PRIORITY keyword hits,
//    else Normal
//
// BAD always wins: "our team's blog" matches "team" but is still a blog.
//
// Rust concepts:
// - Copy enums: LinkTier is small, so it's passed by value
// - Lifetimes: dedup_by_href returns references into the caller's slice
// =============================================================================

use std::collections::HashSet;

use super::KeywordSets;
use crate::fetch::OutboundLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkTier {
    HighPriority,
    Normal,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDecision {
    pub href: String,
    pub tier: LinkTier,
}

#[derive(Debug, Clone)]
pub struct LinkClassifier {
    domain: String,
    keywords: KeywordSets,
}

impl LinkClassifier {
    pub fn new(domain: &str, keywords: KeywordSets) -> Self {
        Self {
            domain: domain.to_string(),
            keywords,
        }
    }

    pub fn classify(&self, href: &str, anchor_text: &str) -> LinkTier {
        // Raw href on purpose: the domain check is a plain substring test
        if !href.contains(&self.domain) || href.contains("mailto") {
            return LinkTier::Rejected;
        }

        let url = href.to_lowercase();
        let text = anchor_text.to_lowercase();

        let matches_good = self.keywords.matches_good(&url, &text);
        let matches_bad = self.keywords.matches_bad(&url, &text);

        if !matches_good || matches_bad {
            LinkTier::Rejected
        } else if self.keywords.matches_priority(&url, &text) {
            LinkTier::HighPriority
        } else {
            LinkTier::Normal
        }
    }

    // Classifies a page's links and returns the accepted ones,
    // every HighPriority link ahead of every Normal link
    pub fn accepted(&self, links: &[OutboundLink]) -> Vec<LinkDecision> {
        let mut high = Vec::new();
        let mut normal = Vec::new();

        for link in dedup_by_href(links) {
            match self.classify(&link.href, &link.anchor_text) {
                LinkTier::HighPriority => high.push(LinkDecision {
                    href: link.href.clone(),
                    tier: LinkTier::HighPriority,
                }),
                LinkTier::Normal => normal.push(LinkDecision {
                    href: link.href.clone(),
                    tier: LinkTier::Normal,
                }),
                LinkTier::Rejected => {}
            }
        }

        high.extend(normal);
        high
    }
}

/// Keeps the first link for each distinct href, preserving page order.
pub fn dedup_by_href(links: &[OutboundLink]) -> Vec<&OutboundLink> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| seen.insert(link.href.as_str()))
        .collect()
}
