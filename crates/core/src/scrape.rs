//! Landing page scraping: fetch a URL and reduce it to visible text.
//!
//! This module provides the [`Scraper`] trait used by the orchestrator and
//! its HTTP implementation [`HttpScraper`]. Remote failures (blocked access,
//! empty pages) are reported through [`ScrapingResult`] rather than as
//! errors; only local problems such as an invalid URL or a transport
//! failure surface as [`RoastError`].

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::audit::ScrapingResult;
use crate::{Result, RoastError};

/// Elements whose text is never visible to a visitor.
const SKIP_ELEMENTS: [&str; 6] = ["script", "style", "noscript", "template", "head", "svg"];

/// Elements that start a new line of copy.
const BLOCK_ELEMENTS: [&str; 16] = [
    "p",
    "div",
    "section",
    "article",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "blockquote",
    "pre",
    "td",
    "th",
    "br",
];

/// HTTP client configuration for scraping landing pages.
///
/// This struct controls timeout, user agent, and the cap on how much
/// extracted text is forwarded to the analysis service.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Maximum number of characters of visible text to keep.
    pub max_chars: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Roastline/1.0; +https://github.com/stormlightlabs/roastline)"
                .to_string(),
            max_chars: 15_000,
        }
    }
}

/// Fetches the visible text of a landing page.
///
/// The orchestrator talks to this trait so tests can substitute scripted
/// scrapers for the real HTTP client.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrapes one URL.
    ///
    /// Returns `Ok` with a failed [`ScrapingResult`] for remote problems
    /// (non-success status, no visible text) and `Err` for local ones
    /// (invalid URL, transport failure, timeout).
    async fn scrape(&self, url: &str) -> Result<ScrapingResult>;
}

/// Scraper backed by a plain HTTP GET.
///
/// Fetches the page with browser-like headers and strips the HTML down to
/// the text a visitor would actually read. The underlying client is built
/// once and reused across scrapes.
#[derive(Debug, Clone)]
pub struct HttpScraper {
    client: Client,
    config: ScrapeConfig,
}

impl HttpScraper {
    /// Creates a scraper over the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RoastError::HttpError`] if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(RoastError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapingResult> {
        let parsed_url = Url::parse(url).map_err(|e| RoastError::InvalidUrl(e.to_string()))?;

        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(RoastError::InvalidUrl(
                "URL must use http:// or https://".to_string(),
            ));
        }

        let response = self
            .client
            .get(parsed_url)
            .header("User-Agent", &self.config.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoastError::Timeout { timeout: self.config.timeout }
                } else {
                    RoastError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ScrapingResult::failed(
                RoastError::Blocked { status: status.as_u16() }.to_string(),
            ));
        }

        let html = response.text().await?;
        let text = visible_text(&html);

        if text.is_empty() {
            return Ok(ScrapingResult::failed(RoastError::EmptyContent.to_string()));
        }

        Ok(ScrapingResult::ok(truncate_chars(&text, self.config.max_chars)))
    }
}

/// Extracts the text a visitor would see, one line per block of copy.
///
/// Script, style, and other non-rendered subtrees are dropped; block
/// elements introduce line breaks; runs of whitespace collapse to a
/// single space.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();

    for node in document.root_element().descendants() {
        if let Some(element) = node.value().as_element() {
            if BLOCK_ELEMENTS.contains(&element.name()) {
                raw.push('\n');
            }
        } else if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIP_ELEMENTS.contains(&el.name()))
            });

            if !hidden {
                raw.push_str(text);
            }
        }
    }

    collapse_whitespace(&raw)
}

/// Collapse intra-line whitespace and drop blank lines.
fn collapse_whitespace(raw: &str) -> String {
    let spaces = Regex::new(r"\s+").unwrap();

    raw.lines()
        .map(|line| spaces.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to a character count without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_config_default() {
        let config = ScrapeConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_chars, 15_000);
        assert!(config.user_agent.contains("Roastline"));
    }

    #[test]
    fn test_scraper_construction_reuses_one_client() {
        let scraper = HttpScraper::new(ScrapeConfig::default()).unwrap();
        // Cloning shares the same underlying connection pool.
        let _clone = scraper.clone();
    }

    #[tokio::test]
    async fn test_scrape_invalid_url() {
        let scraper = HttpScraper::new(ScrapeConfig::default()).unwrap();
        let result = scraper.scrape("not-a-url").await;
        assert!(matches!(result, Err(RoastError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_scrape_rejects_non_http_scheme() {
        let scraper = HttpScraper::new(ScrapeConfig::default()).unwrap();
        let result = scraper.scrape("ftp://example.com").await;
        assert!(matches!(result, Err(RoastError::InvalidUrl(_))));
    }

    #[test]
    fn test_visible_text_strips_scripts_and_styles() {
        let html = r#"
            <html>
            <head><title>Shop</title><style>body { color: red; }</style></head>
            <body>
                <h1>Buy the thing</h1>
                <script>console.log("tracking");</script>
                <p>It slices. It dices.</p>
            </body>
            </html>
        "#;

        let text = visible_text(html);
        assert!(text.contains("Buy the thing"));
        assert!(text.contains("It slices. It dices."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Shop"));
    }

    #[test]
    fn test_visible_text_block_breaks() {
        let html = "<body><h1>Headline</h1><p>First.</p><p>Second.</p></body>";
        let text = visible_text(html);
        assert_eq!(text, "Headline\nFirst.\nSecond.");
    }

    #[test]
    fn test_visible_text_collapses_whitespace() {
        let html = "<body><p>Too    many\t spaces</p></body>";
        assert_eq!(visible_text(html), "Too many spaces");
    }

    #[test]
    fn test_visible_text_empty_page() {
        assert_eq!(visible_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        // Multi-byte characters are kept whole.
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
