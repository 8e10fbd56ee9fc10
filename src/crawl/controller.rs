// src/crawl/controller.rs
// =============================================================================
// The crawl loop.
//
// How a run goes:
// 1. Queue the seed (https://{domain}/)
// 2. Keep up to max_concurrency fetches in flight, pulled from the frontier
// 3. When a page arrives: extract emails, check for the name, apply the
//    retention policy, classify links and queue the accepted ones
// 4. When a homepage attempt fails: ask FallbackState for the next form or
//    abort the run; any other failed page is just dropped
// 5. Stop when nothing is queued and nothing is in flight (the frontier stops
//    handing out requests once max_pages have been dispatched)
//
// Fetches are the only await points. Everything that mutates the frontier or
// the result set happens here, between awaits, so two pages can never race on
// the queue or the page budget. Pages already in flight when the budget runs
// out still finish and still go through retention.
//
// Rust concepts:
// - FuturesUnordered: a set of in-flight futures, yielding whichever finishes first
// - tokio::time::timeout: wraps a future with a deadline
// - let ... else: bind on success, leave the loop otherwise
// - Generics (EmailFinder<F: PageFetcher>): tests use a fake fetcher, no network
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use url::Url;

use super::fallback::{FallbackDecision, FallbackState};
use super::frontier::{Frontier, QueuedRequest};
use super::retention::{self, Retention, ResultSet};
use crate::error::{FetchError, FinderError};
use crate::extract::{contains_name, extract_emails, partition_by_domain};
use crate::fetch::{FetchedPage, PageFetcher};
use crate::links::{KeywordSets, LinkClassifier, LinkTier};
use crate::model::{CrawlBudget, EmailRecord, Target};

/// Runs the email search for one target over a page fetcher.
pub struct EmailFinder<F> {
    fetcher: F,
    budget: CrawlBudget,
    keywords: KeywordSets,
}

impl<F: PageFetcher> EmailFinder<F> {
    pub fn new(fetcher: F, budget: CrawlBudget) -> Self {
        Self {
            fetcher,
            budget,
            keywords: KeywordSets::default(),
        }
    }

    pub fn with_keywords(mut self, keywords: KeywordSets) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls the target's website and returns the final record.
    ///
    /// Fails only when the homepage and all of its fallback forms are
    /// unreachable; in that case no partial record is produced.
    pub async fn run(&self, target: &Target) -> Result<EmailRecord, FinderError> {
        let seed_url = target.seed_url();
        let seed = Url::parse(&seed_url).map_err(|e| FinderError::InvalidSeed {
            url: seed_url.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            full_name = %target.full_name,
            domain = %target.domain,
            max_pages = self.budget.max_pages,
            max_concurrency = self.budget.concurrency(),
            "Starting email search"
        );

        let mut run = RunState::new(target, self.budget.max_pages, self.keywords.clone());
        // Url normalizes "https://school.edu" to "https://school.edu/"
        run.frontier.push_seed(seed.to_string());

        // Fetches currently running; never more than max_concurrency
        let mut in_flight = FuturesUnordered::new();
        loop {
            // Top up the in-flight set from the frontier
            while in_flight.len() < self.budget.concurrency() {
                match run.frontier.next() {
                    Some(request) => in_flight.push(self.dispatch(request)),
                    None => break,
                }
            }

            // None means nothing is running and nothing was dispatched: done
            let Some((request, outcome)) = in_flight.next().await else {
                break;
            };

            // Back in the run loop: only here do frontier and results change

            match outcome {
                Ok(page) => run.on_success(&request, page),
                Err(error) => run.on_failure(request, error)?,
            }
        }

        tracing::info!(
            pages = run.frontier.dispatched(),
            emails = run.results.len(),
            "Crawl finished"
        );

        Ok(run.finish())
    }

    async fn dispatch(&self, request: QueuedRequest) -> (QueuedRequest, Result<FetchedPage, FetchError>) {
        tracing::debug!(url = %request.url, origin = ?request.origin, "Dispatching");

        // The deadline covers the whole fetch, whatever the fetcher does inside
        let outcome =
            match tokio::time::timeout(self.budget.page_timeout(), self.fetcher.fetch(&request.url))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Timeout {
                    url: request.url.clone(),
                    secs: self.budget.per_page_timeout_seconds,
                }),
            };

        (request, outcome)
    }
}

// Everything a single run owns
struct RunState<'a> {
    target: &'a Target,
    frontier: Frontier,
    results: ResultSet,
    fallback: FallbackState,
    classifier: LinkClassifier,
}

impl<'a> RunState<'a> {
    fn new(target: &'a Target, max_pages: usize, keywords: KeywordSets) -> Self {
        Self {
            target,
            frontier: Frontier::new(max_pages),
            results: ResultSet::new(&target.domain),
            fallback: FallbackState::default(),
            classifier: LinkClassifier::new(&target.domain, keywords),
        }
    }

    fn on_success(&mut self, request: &QueuedRequest, page: FetchedPage) {
        tracing::info!(final_url = %page.final_url, "Visiting {}", request.url);
        let domain = &self.target.domain;

        // Raw markup, not visible text: mailto: links hide addresses
        let all_emails = extract_emails(&page.raw_html);
        tracing::info!(
            "Found {} email(s) on this page: {}",
            all_emails.len(),
            all_emails.join(", ")
        );

        let split = partition_by_domain(all_emails, domain);
        if !split.foreign.is_empty() {
            tracing::info!(
                "Skipped {} email(s) not matching @{}: {}",
                split.foreign.len(),
                domain,
                split.foreign.join(", ")
            );
        }
        tracing::info!(
            "Retained {} email(s) matching @{}: {}",
            split.matching.len(),
            domain,
            split.matching.join(", ")
        );

        let name_parts = self.target.name_parts();
        let name_found = contains_name(&page.visible_text, name_parts);
        tracing::info!(
            "Does page contain all name parts ({}): {}",
            name_parts.join(", "),
            name_found
        );

        let decision = retention::decide(split.matching, name_found, self.results.is_empty());
        match &decision {
            Retention::NameConfirmed(emails) => {
                tracing::info!("Adding {} email(s) because name was found.", emails.len());
            }
            Retention::FallbackSeed(emails) => {
                tracing::info!(
                    "Adding {} fallback email(s) because no personal email found yet.",
                    emails.len()
                );
            }
            Retention::Skip => tracing::info!("No emails added from this page."),
        }
        self.results.extend(decision.into_emails());

        // accepted() already puts HighPriority ahead of Normal
        let mut high = 0;
        let mut normal = 0;
        for decision in self.classifier.accepted(&page.links) {
            if self.frontier.enqueue(&decision) {
                match decision.tier {
                    LinkTier::HighPriority => high += 1,
                    _ => normal += 1,
                }
            }
        }
        tracing::info!(
            high_priority = high,
            normal,
            queued = self.frontier.queued(),
            "Enqueued links from {}",
            request.url
        );
    }

    fn on_failure(&mut self, request: QueuedRequest, error: FetchError) -> Result<(), FinderError> {
        // The error already names the URL it failed on
        if !request.is_homepage_attempt() {
            tracing::warn!(url = %error.url(), "Request failed, dropping page: {}", error);
            return Ok(());
        }

        tracing::error!(url = %error.url(), "Homepage request failed: {}", error);

        match self.fallback.next(&request.url) {
            FallbackDecision::Retry { url, form } => {
                tracing::info!(?form, "Retrying homepage with {}", url);
                if self.frontier.push_fallback(url.clone(), form) {
                    Ok(())
                } else {
                    Err(self.abort(url, "fallback URL was already visited".to_string()))
                }
            }
            FallbackDecision::Exhausted { reason } => {
                Err(self.abort(request.url, format!("{}; {}", error, reason)))
            }
        }
    }

    fn abort(&self, url: String, reason: String) -> FinderError {
        tracing::error!("All homepage fallbacks failed. Aborting early to save cost.");
        FinderError::FallbackExhausted { url, reason }
    }

    fn finish(self) -> EmailRecord {
        EmailRecord {
            full_name: self.target.full_name.clone(),
            domain: self.target.domain.clone(),
            emails: self.results.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::parse_page;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    // Serves canned HTML; any URL it doesn't know fails like a dead host
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: HashMap<String, String>,
        slow: HashSet<String>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages
                .insert(url.to_string(), format!("<html><body>{}</body></html>", body));
            self
        }

        fn slow(mut self, url: &str) -> Self {
            self.slow.insert(url.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::task::yield_now().await;
            if self.slow.contains(url) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.pages.get(url) {
                Some(html) => Ok(parse_page(url.to_string(), html.clone())),
                None => Err(FetchError::Navigation {
                    url: url.to_string(),
                    message: "Connection failed".to_string(),
                }),
            }
        }
    }

    fn default_finder(fetcher: ScriptedFetcher) -> EmailFinder<ScriptedFetcher> {
        EmailFinder::new(fetcher, CrawlBudget::default())
    }

    fn jane() -> Target {
        Target::new("Jane Doe", "school.edu").unwrap()
    }

    #[tokio::test]
    async fn test_name_confirmed_page_keeps_only_domain_emails() {
        let fetcher = ScriptedFetcher::default().page(
            "https://school.edu/",
            r#"<p>Jane Doe, Principal</p>
               <a href="mailto:jane.doe@school.edu">jane.doe@school.edu</a>
               <p>Partner: info@otherdomain.com</p>"#,
        );
        let record = default_finder(fetcher).run(&jane()).await.unwrap();

        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.domain, "school.edu");
        assert_eq!(record.emails, vec!["jane.doe@school.edu"]);
    }

    #[tokio::test]
    async fn test_fallback_seed_is_kept_and_never_retracted() {
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://school.edu/",
                r#"Welcome! Write to info@school.edu
                   <a href="/staff">Staff</a> <a href="/contact">Contact</a>"#,
            )
            .page("https://school.edu/staff", "Jane Doe - jane.doe@school.edu")
            .page("https://school.edu/contact", "Front office: office@school.edu");

        let record = default_finder(fetcher).run(&jane()).await.unwrap();
        assert_eq!(record.emails, vec!["info@school.edu", "jane.doe@school.edu"]);
    }

    #[tokio::test]
    async fn test_results_are_unique() {
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://school.edu/",
                r#"Jane Doe jane.doe@school.edu <a href="/staff">Staff</a>"#,
            )
            .page("https://school.edu/staff", "Jane Doe: jane.doe@school.edu, JANE.DOE@school.edu");

        let record = default_finder(fetcher).run(&jane()).await.unwrap();
        assert_eq!(record.emails, vec!["jane.doe@school.edu", "JANE.DOE@school.edu"]);
    }

    #[tokio::test]
    async fn test_mailto_bad_and_foreign_links_never_dispatched() {
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://school.edu/",
                r#"<a href="mailto:staff@school.edu">Staff</a>
                   <a href="/team-blog">Team blog</a>
                   <a href="https://other.org/staff">Staff</a>
                   <a href="/about">About</a>
                   <a href="/staff">Staff</a>"#,
            )
            .page("https://school.edu/staff", r#"<a href="/">About us</a>"#)
            .page("https://school.edu/about", "");

        let finder = default_finder(fetcher);
        finder.run(&jane()).await.unwrap();

        let mut calls = finder.fetcher().calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "https://school.edu/",
                "https://school.edu/about",
                "https://school.edu/staff",
            ]
        );
    }

    #[tokio::test]
    async fn test_page_budget_caps_dispatches() {
        let links: String = (1..=15)
            .map(|i| format!(r#"<a href="/staff-{}">Staff {}</a>"#, i, i))
            .collect();
        let mut fetcher = ScriptedFetcher::default().page("https://school.edu/", &links);
        for i in 1..=15 {
            fetcher = fetcher.page(&format!("https://school.edu/staff-{}", i), "");
        }

        let finder = default_finder(fetcher);
        finder.run(&jane()).await.unwrap();

        let calls = finder.fetcher().calls();
        assert_eq!(calls.len(), 10);
        assert!(calls.contains(&"https://school.edu/staff-9".to_string()));
        assert!(!calls.contains(&"https://school.edu/staff-10".to_string()));
    }

    #[tokio::test]
    async fn test_in_flight_page_finishes_after_budget_runs_out() {
        // Both links are dispatched together, which spends the whole budget
        // while /team is still in flight
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://school.edu/",
                r#"<a href="/staff">Staff</a> <a href="/team">Team</a>"#,
            )
            .page("https://school.edu/staff", "Nobody here")
            .page("https://school.edu/team", "Jane Doe jane@school.edu");
        let budget = CrawlBudget {
            max_pages: 3,
            max_concurrency: 2,
            ..CrawlBudget::default()
        };

        let finder = EmailFinder::new(fetcher, budget);
        let record = finder.run(&jane()).await.unwrap();

        assert!(record.emails.contains(&"jane@school.edu".to_string()));
        let mut calls = finder.fetcher().calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "https://school.edu/",
                "https://school.edu/staff",
                "https://school.edu/team",
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrency_cap() {
        let links: String = (1..=6)
            .map(|i| format!(r#"<a href="/staff-{}">Staff</a>"#, i))
            .collect();
        let fetcher = ScriptedFetcher::default().page("https://school.edu/", &links);

        let finder = default_finder(fetcher);
        finder.run(&jane()).await.unwrap();

        assert_eq!(finder.fetcher().calls().len(), 7);
        assert!(finder.fetcher().peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_high_priority_links_visited_before_normal() {
        let fetcher = ScriptedFetcher::default().page(
            "https://school.edu/",
            r#"<a href="/who-we-are">Who we are</a>
               <a href="/our-people">Our people</a>"#,
        );
        let budget = CrawlBudget {
            max_pages: 2,
            ..CrawlBudget::default()
        };
        let finder = EmailFinder::new(fetcher, budget);
        finder.run(&jane()).await.unwrap();

        assert_eq!(
            finder.fetcher().calls(),
            vec!["https://school.edu/", "https://school.edu/our-people"]
        );
    }

    #[tokio::test]
    async fn test_failed_discovered_page_is_dropped() {
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://school.edu/",
                r#"<a href="/staff">Staff</a> <a href="/contact">Contact</a>"#,
            )
            .page("https://school.edu/contact", "Jane Doe jane@school.edu");

        let finder = default_finder(fetcher);
        let record = finder.run(&jane()).await.unwrap();

        assert_eq!(record.emails, vec!["jane@school.edu"]);
        assert_eq!(finder.fetcher().calls().len(), 3);
    }

    #[tokio::test]
    async fn test_homepage_failure_falls_back_to_www() {
        let fetcher = ScriptedFetcher::default()
            .page("https://www.example.org/", "Jane Doe jane@example.org");
        let target = Target::new("Jane Doe", "example.org").unwrap();

        let finder = default_finder(fetcher);
        let record = finder.run(&target).await.unwrap();

        assert_eq!(
            finder.fetcher().calls(),
            vec!["https://example.org/", "https://www.example.org/"]
        );
        assert_eq!(record.emails, vec!["jane@example.org"]);
    }

    #[tokio::test]
    async fn test_fallback_chain_then_abort() {
        let target = Target::new("Jane Doe", "example.org").unwrap();
        let finder = default_finder(ScriptedFetcher::default());

        let err = finder.run(&target).await.unwrap_err();
        assert!(matches!(err, FinderError::FallbackExhausted { ref url, .. } if url == "http://www.example.org/"));
        assert_eq!(
            finder.fetcher().calls(),
            vec![
                "https://example.org/",
                "https://www.example.org/",
                "http://www.example.org/",
            ]
        );
    }

    #[tokio::test]
    async fn test_www_domain_goes_straight_to_http() {
        let target = Target::new("Jane Doe", "www.example.org").unwrap();
        let finder = default_finder(ScriptedFetcher::default());

        assert!(finder.run(&target).await.is_err());
        assert_eq!(
            finder.fetcher().calls(),
            vec!["https://www.example.org/", "http://www.example.org/"]
        );
    }

    #[tokio::test]
    async fn test_subdomain_homepage_failure_aborts_immediately() {
        let target = Target::new("Jane Doe", "cs.school.edu").unwrap();
        let finder = default_finder(ScriptedFetcher::default());

        assert!(matches!(
            finder.run(&target).await,
            Err(FinderError::FallbackExhausted { .. })
        ));
        assert_eq!(finder.fetcher().calls(), vec!["https://cs.school.edu/"]);
    }

    #[tokio::test]
    async fn test_slow_homepage_times_out_into_fallback() {
        let fetcher = ScriptedFetcher::default()
            .page("https://example.org/", "never served")
            .slow("https://example.org/")
            .page("https://www.example.org/", "info@example.org");
        let budget = CrawlBudget {
            per_page_timeout_seconds: 1,
            ..CrawlBudget::default()
        };
        let target = Target::new("Jane Doe", "example.org").unwrap();

        let record = EmailFinder::new(fetcher, budget).run(&target).await.unwrap();
        assert_eq!(record.emails, vec!["info@example.org"]);
    }

    #[tokio::test]
    async fn test_custom_keywords() {
        let fetcher = ScriptedFetcher::default()
            .page("https://school.edu/", r#"<a href="/faculty">Faculty</a> <a href="/alumni">Alumni</a>"#)
            .page("https://school.edu/alumni", "");
        let keywords = KeywordSets {
            good: vec!["alumni".to_string()],
            bad: vec!["faculty".to_string()],
            priority: Vec::new(),
        };

        let finder = default_finder(fetcher).with_keywords(keywords);
        finder.run(&jane()).await.unwrap();
        assert_eq!(
            finder.fetcher().calls(),
            vec!["https://school.edu/", "https://school.edu/alumni"]
        );
    }
}
