// src/crawl/fallback.rs
// =============================================================================
// Homepage fallback.
//
// When the homepage request fails we try, at most once each:
//   https://example.org/      ->  https://www.example.org/   (www insertion)
//   https://www.example.org/  ->  http://www.example.org/    (scheme downgrade)
// Anything else, or a second failure of the same form, ends the run.
//
// The second rule can only fire on a www host, which is what the first rule
// produces, so the chain is at most seed -> www -> http.
//
// Rust concepts:
// - let ... else: return early when the URL has no host
// - Enums with data: Retry carries the URL to try next
// - #[derive(Default)]: FallbackState starts with nothing tried
// =============================================================================

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackForm {
    WwwSubdomain,
    HttpScheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackDecision {
    Retry { url: String, form: FallbackForm },
    Exhausted { reason: String },
}

/// Which fallback forms this run has already used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackState {
    pub www_tried: bool,
    pub http_tried: bool,
}

impl FallbackState {
    /// Decides what to do after `failed_url` (a homepage attempt) failed.
    pub fn next(&mut self, failed_url: &str) -> FallbackDecision {
        let url = match Url::parse(failed_url) {
            Ok(url) => url,
            Err(e) => {
                return FallbackDecision::Exhausted {
                    reason: format!("unparseable URL: {}", e),
                }
            }
        };
        let Some(host) = url.host_str() else {
            return FallbackDecision::Exhausted {
                reason: "URL has no host".to_string(),
            };
        };

        // Url always gives "/" for an empty http(s) path; both are checked anyway
        let is_root = url.path() == "/" || url.path().is_empty();
        let is_https = url.scheme() == "https";
        // "example.org" has one dot, "www.example.org" and "cs.school.edu" two
        let no_subdomain = host.matches('.').count() == 1;

        if is_root && is_https && no_subdomain && !self.www_tried {
            self.www_tried = true;
            let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
            return FallbackDecision::Retry {
                url: format!("https://www.{}{}/", host, port),
                form: FallbackForm::WwwSubdomain,
            };
        }

        if url.path() == "/" && is_https && host.starts_with("www.") && !self.http_tried {
            self.http_tried = true;
            return FallbackDecision::Retry {
                url: format!("http://{}/", host),
                form: FallbackForm::HttpScheme,
            };
        }

        FallbackDecision::Exhausted {
            reason: "no homepage fallback left".to_string(),
        }
    }
}
