// src/cli.rs
// =============================================================================
// Process-boundary arguments, parsed with clap.
//
// The search itself takes a structured object ({ "fullName", "domain" }), so
// the flags only say where that object comes from, where the record goes, and
// how to override the crawl budget.
//
// Rust concepts:
// - Struct update syntax (..CrawlBudget::default()): fill the remaining fields
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use email_scout::CrawlBudget;

#[derive(Parser, Debug)]
#[command(
    name = "email-scout",
    version = "0.1.0",
    about = "Find a person's email address by crawling their organization's website",
    long_about = "email-scout reads a JSON object { \"fullName\": ..., \"domain\": ... }, crawls \
                  the domain's website starting at the homepage, and writes one JSON record \
                  with the email addresses it kept."
)]
pub struct Cli {
    /// JSON input file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write the result record (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// JSON file replacing the good/bad/priority link keyword lists
    #[arg(long)]
    pub keywords: Option<PathBuf>,

    /// Maximum number of pages fetched in one run
    #[arg(long, default_value_t = 10)]
    pub max_pages: usize,

    /// Maximum number of fetches in flight at once
    #[arg(long, default_value_t = 2)]
    pub max_concurrency: usize,

    /// Per-page timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Emit logs as JSON lines instead of plain text
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    pub fn budget(&self) -> CrawlBudget {
        CrawlBudget {
            max_pages: self.max_pages,
            max_concurrency: self.max_concurrency,
            per_page_timeout_seconds: self.timeout_secs,
            ..CrawlBudget::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_default_budget() {
        let cli = Cli::parse_from(["email-scout"]);
        assert_eq!(cli.budget(), CrawlBudget::default());
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_budget_overrides() {
        let cli = Cli::parse_from(["email-scout", "--max-pages", "3", "--timeout-secs", "5"]);
        let budget = cli.budget();
        assert_eq!(budget.max_pages, 3);
        assert_eq!(budget.per_page_timeout_seconds, 5);
        assert_eq!(budget.max_retries, 0);
    }
}
