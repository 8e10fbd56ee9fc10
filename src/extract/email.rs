// src/extract/email.rs
// =============================================================================
// Email extraction.
//
// We scan the raw HTML rather than the visible text: addresses often only
// exist inside mailto: attributes or inline scripts.
//
// The pattern is deliberately permissive:
//   local part  letters, digits and . _ % + -
//   host        letters, digits, dots and hyphens
//   TLD         two or more lowercase letters
//
// Rust concepts:
// - OnceLock: compiles the regex once, on first use, shared by every call
// - Iterators: find_iter().map().collect() keeps matches in page order
// - partition(): splits one Vec into two by a predicate in a single pass
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

// Compiled on first call, then reused by every page
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Constant pattern, known to compile
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-z]{2,}").unwrap()
    })
}

// Returns every non-overlapping match, in order of appearance.
// Duplicates are kept; the result set deduplicates at the end of the run.
pub fn extract_emails(raw_html: &str) -> Vec<String> {
    email_pattern()
        .find_iter(raw_html)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True when `email` ends with `@domain`, ignoring case.
pub fn is_domain_email(email: &str, domain: &str) -> bool {
    let suffix = format!("@{}", domain.to_lowercase());
    email.to_lowercase().ends_with(&suffix)
}

/// Emails found on one page, split by whether they belong to the target domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainEmails {
    pub matching: Vec<String>,
    pub foreign: Vec<String>,
}

pub fn partition_by_domain(emails: Vec<String>, domain: &str) -> DomainEmails {
    let (matching, foreign) = emails
        .into_iter()
        .partition(|email| is_domain_email(email, domain));
    DomainEmails { matching, foreign }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_markup() {
        let html = r#"
            <a href="mailto:jane.doe@school.edu">Email Jane</a>
            <script>var c = "info@otherdomain.com";</script>
        "#;
        assert_eq!(
            extract_emails(html),
            vec!["jane.doe@school.edu", "info@otherdomain.com"]
        );
    }

    #[test]
    fn test_tld_must_be_lowercase() {
        assert!(extract_emails("SALES@SHOP.COM").is_empty());
        assert_eq!(extract_emails("Jane@School.edu"), vec!["Jane@School.edu"]);
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        let found = extract_emails("a@x.org b@x.org a@x.org");
        assert_eq!(found, vec!["a@x.org", "b@x.org", "a@x.org"]);
    }

    #[test]
    fn test_domain_match_is_case_insensitive_suffix() {
        assert!(is_domain_email("Jane@School.EDU", "school.edu"));
        assert!(is_domain_email("jane@school.edu", "School.edu"));
        assert!(!is_domain_email("jane@highschool.edu.au", "school.edu"));
        // Suffix includes the '@', so a subdomain address does not count
        assert!(!is_domain_email("jane@mail.school.edu", "school.edu"));
    }

    #[test]
    fn test_partition() {
        let split = partition_by_domain(
            vec![
                "jane.doe@school.edu".to_string(),
                "info@otherdomain.com".to_string(),
            ],
            "school.edu",
        );
        assert_eq!(split.matching, vec!["jane.doe@school.edu"]);
        assert_eq!(split.foreign, vec!["info@otherdomain.com"]);
    }
}
