// src/links/keywords.rs
// =============================================================================
// Keyword lists that steer the crawl toward staff-directory style pages.
//
// - good: a link must hit at least one of these to be followed
// - bad: any hit vetoes the link, even if it also hits a good word
// - priority: followed links that hit one of these are visited first
//
// They are plain data (serde) so a caller can swap them per run.
//
// Rust concepts:
// - &[&str] constants: the defaults live in the binary, no allocation
// - impl Default: `KeywordSets::default()` builds owned Vecs from them
// =============================================================================

use serde::{Deserialize, Serialize};

const GOOD: &[&str] = &[
    "staff", "team", "leadership", "people", "directory", "about", "contact", "faculty",
    "our-team", "employees", "personnel", "who-we-are",
];

const BAD: &[&str] = &[
    "blog", "news", "donate", "service", "services", "event", "events", "career", "careers",
    "volunteer", "give", "program", "calendar", "story", "stories", "press", "media",
    "resources", "covid", "policy", "privacy", "terms", "faq", "testimonials", "partners",
    "board", "history", "mission", "vision",
];

const PRIORITY: &[&str] = &[
    "staff", "team", "leadership", "people", "directory", "about", "contact", "faculty",
    "employees", "personnel",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    pub good: Vec<String>,
    pub bad: Vec<String>,
    pub priority: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            good: to_owned(GOOD),
            bad: to_owned(BAD),
            priority: to_owned(PRIORITY),
        }
    }
}

impl KeywordSets {
    pub fn matches_good(&self, url: &str, text: &str) -> bool {
        any_hit(&self.good, url, text)
    }

    pub fn matches_bad(&self, url: &str, text: &str) -> bool {
        any_hit(&self.bad, url, text)
    }

    pub fn matches_priority(&self, url: &str, text: &str) -> bool {
        any_hit(&self.priority, url, text)
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// Callers pass url and text already lowercased
fn any_hit(words: &[String], url: &str, text: &str) -> bool {
    words
        .iter()
        .any(|kw| url.contains(kw.as_str()) || text.contains(kw.as_str()))
}
