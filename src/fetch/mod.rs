// src/fetch/mod.rs
// =============================================================================
// The page-fetch collaborator.
//
// The crawl controller never talks to the network directly. It hands a URL to
// a PageFetcher and gets back the raw markup, the visible text and the links
// of the page, or a FetchError. Navigation, rendering and network retries are
// the fetcher's business.
//
// Submodules:
// - http: the default fetcher, built on reqwest + scraper
//
// Rust concepts:
// - Traits: PageFetcher is the seam; tests plug in a scripted fetcher
// - #[async_trait]: async fns in a trait that must work behind generics
// - Send + Sync bounds: the fetcher is shared by every in-flight fetch
// =============================================================================

mod http;

use async_trait::async_trait;
use crate::error::FetchError;

pub use http::HttpFetcher;
#[cfg(test)]
pub(crate) use http::parse_page;

/// A link found on a page, with the text a visitor would click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    /// Absolute URL
    pub href: String,
    pub anchor_text: String,
}

/// Everything the crawl needs from one page. Consumed immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    pub raw_html: String,
    pub visible_text: String,
    pub links: Vec<OutboundLink>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
