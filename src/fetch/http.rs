// src/fetch/http.rs
// =============================================================================
// Default PageFetcher: plain HTTP GET with reqwest, parsing with scraper.
//
// What it does per URL:
// 1. GET the page (short timeout, a handful of redirects)
// 2. Treat any non-2xx status as a failure
// 3. Pull the visible text out of <body> (skipping script/style/noscript)
// 4. Collect every <a href> resolved against the final URL, with its text
//
// It does not run JavaScript. Sites that build their staff pages client-side
// will simply show fewer emails.
//
// Rust concepts:
// - Recursion over the DOM tree: collect_text walks children depth-first
// - filter_map + ?: skips links whose href can't be resolved
// - Match guards (`Err(e) if attempt < max`): retry only while attempts remain
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use url::Url;

use super::{FetchedPage, OutboundLink, PageFetcher};
use crate::error::FetchError;
use crate::model::CrawlBudget;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// Elements whose text never shows up on screen
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
    max_retries: u32,
}

impl HttpFetcher {
    /// Builds a fetcher configured from the crawl budget.
    pub fn new(budget: &CrawlBudget) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(budget.per_page_timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            timeout_secs: budget.per_page_timeout_seconds,
            max_retries: budget.max_retries,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let raw_html = response
            .text()
            .await
            .map_err(|e| self.categorize_error(url, e))?;

        Ok(parse_page(final_url, raw_html))
    }

    // Turns a reqwest error into a short, loggable reason
    fn categorize_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        let url = url.to_string();
        if error.is_timeout() {
            return FetchError::Timeout {
                url,
                secs: self.timeout_secs,
            };
        }

        let error_string = error.to_string();
        let message = if error.is_redirect() {
            "Too many redirects".to_string()
        } else if error.is_connect() {
            if error_string.contains("dns") {
                "Could not resolve hostname".to_string()
            } else {
                "Connection failed".to_string()
            }
        } else if error_string.contains("certificate") || error_string.contains("ssl") {
            "SSL certificate error".to_string()
        } else {
            error_string
        };

        FetchError::Navigation { url, message }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(url, attempt, error = %e, "Retrying fetch");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Builds a FetchedPage from markup already downloaded from `final_url`
pub(crate) fn parse_page(final_url: String, raw_html: String) -> FetchedPage {
    let document = Html::parse_document(&raw_html);
    let visible_text = extract_visible_text(&document);
    let links = match Url::parse(&final_url) {
        Ok(base) => extract_links(&document, &base),
        Err(_) => Vec::new(),
    };

    FetchedPage {
        final_url,
        raw_html,
        visible_text,
        links,
    }
}

fn extract_visible_text(document: &Html) -> String {
    // Constant selector, known to be valid
    let body_selector = Selector::parse("body").unwrap();
    let root = document
        .select(&body_selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut chunks = Vec::new();
    collect_text(root, &mut chunks);
    chunks.join(" ")
}

fn collect_text(element: ElementRef, chunks: &mut Vec<String>) {
    if HIDDEN_ELEMENTS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    chunks.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, chunks);
                }
            }
            _ => {}
        }
    }
}

fn extract_links(document: &Html, base: &Url) -> Vec<OutboundLink> {
    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let absolute = base.join(href.trim()).ok()?;
            let anchor_text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Some(OutboundLink {
                href: absolute.to_string(),
                anchor_text,
            })
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why keep raw_html when we already have visible_text?
//    - Emails often sit in mailto: attributes, which are not visible text
//
// 2. What is ElementRef::wrap?
//    - Tree children are generic nodes (text, comments, elements)
//    - wrap() gives back an ElementRef only when the node is an element
//
// 3. Why does the retry loop live here and not in the crawl?
//    - Retrying is a transport concern; the crawl only sees the final outcome
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts() {
        let page = parse_page(
            "https://school.edu/".to_string(),
            r#"<html><head><title>Home</title></head>
               <body><h1>Jane Doe</h1><script>var x = "hidden";</script><p>Principal</p></body></html>"#
                .to_string(),
        );
        assert!(page.visible_text.contains("Jane Doe"));
        assert!(page.visible_text.contains("Principal"));
        assert!(!page.visible_text.contains("hidden"));
        assert!(!page.visible_text.contains("Home"));
    }

    #[test]
    fn test_links_resolved_against_final_url() {
        let page = parse_page(
            "https://school.edu/about/".to_string(),
            r#"<a href="staff">Our   Staff</a>
               <a href="/contact">Contact</a>
               <a href="mailto:info@school.edu">Email us</a>"#
                .to_string(),
        );
        assert_eq!(
            page.links,
            vec![
                OutboundLink {
                    href: "https://school.edu/about/staff".to_string(),
                    anchor_text: "Our Staff".to_string(),
                },
                OutboundLink {
                    href: "https://school.edu/contact".to_string(),
                    anchor_text: "Contact".to_string(),
                },
                OutboundLink {
                    href: "mailto:info@school.edu".to_string(),
                    anchor_text: "Email us".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_raw_html_is_kept_for_email_scanning() {
        let html = r#"<a href="mailto:jane@school.edu">Jane</a>"#.to_string();
        let page = parse_page("https://school.edu/".to_string(), html.clone());
        assert_eq!(page.raw_html, html);
        assert_eq!(page.final_url, "https://school.edu/");
    }

    #[test]
    fn test_builds_from_default_budget() {
        assert!(HttpFetcher::new(&CrawlBudget::default()).is_ok());
    }
}
