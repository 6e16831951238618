//! Page fetching as an injected capability
//!
//! The verifier never talks to the network directly: it receives a
//! `PageFetcher`, asks it to navigate, and reads fields off the returned
//! `Document`. Tests slot in an in-memory stub; production uses
//! `HttpPageFetcher` over the shared `HttpClient`.

use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::scrape_error::ScrapeResult;
use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Wait condition for a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Resolve once the DOM is parsed
    DomContentLoaded,
    /// Resolve once the page has settled with no pending requests
    NetworkIdle,
}

/// Injected page-fetching capability
///
/// One fetcher instance is created per run and shared by every navigation,
/// so implementations can reuse a single session (cookies, connections)
/// across entries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and parse one page
    async fn navigate(
        &self,
        url: &str,
        wait: WaitUntil,
        timeout: Duration,
    ) -> ScrapeResult<Document>;
}

/// A fetched, parsed page
pub struct Document {
    html: Html,
    url: String,
}

impl Document {
    /// Parse a document from an HTML body
    pub fn from_html(body: &str, url: &str) -> Self {
        Self {
            html: Html::parse_document(body),
            url: url.to_string(),
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// First element matching the selector
    pub fn find_by_selector(&self, selector: &Selector) -> Option<ElementHandle<'_>> {
        self.html
            .select(selector)
            .next()
            .map(ElementHandle::from_node)
    }

    /// First regex match over the page's visible text
    ///
    /// Capture group 1 is preferred over the whole match, so patterns can
    /// pull one number out of a longer phrase.
    pub fn find_by_text(&self, pattern: &Regex) -> Option<ElementHandle<'_>> {
        let text = self.visible_text();
        pattern.captures(&text).map(|caps| {
            let matched = match caps.get(1) {
                Some(group) => group.as_str(),
                None => caps.get(0).map_or("", |m| m.as_str()),
            };
            ElementHandle::from_text(matched.to_string())
        })
    }

    /// First regex match over the raw serialized HTML, for markup that
    /// never renders as visible text
    pub fn find_in_html(&self, pattern: &Regex) -> Option<String> {
        let raw = self.html.html();
        pattern.captures(&raw).map(|caps| match caps.get(1) {
            Some(group) => group.as_str().to_string(),
            None => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
        })
    }

    fn visible_text(&self) -> String {
        self.html.root_element().text().collect::<Vec<_>>().join(" ")
    }
}

/// Handle to one located piece of page content
pub struct ElementHandle<'a> {
    inner: HandleInner<'a>,
}

enum HandleInner<'a> {
    Node(ElementRef<'a>),
    Text(String),
}

impl<'a> ElementHandle<'a> {
    fn from_node(node: ElementRef<'a>) -> Self {
        Self {
            inner: HandleInner::Node(node),
        }
    }

    fn from_text(text: String) -> Self {
        Self {
            inner: HandleInner::Text(text),
        }
    }

    /// The element's trimmed text content
    ///
    /// A fully parsed document resolves immediately; the timeout parameter
    /// is the contract for settle-capable fetchers.
    pub fn text(&self, _timeout: Duration) -> ScrapeResult<String> {
        match &self.inner {
            HandleInner::Node(node) => Ok(node.text().collect::<String>().trim().to_string()),
            HandleInner::Text(text) => Ok(text.trim().to_string()),
        }
    }

    /// Attribute value; only structured matches carry attributes
    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.inner {
            HandleInner::Node(node) => node.value().attr(name).map(str::to_string),
            HandleInner::Text(_) => None,
        }
    }
}

/// Production fetcher over the shared HTTP client
pub struct HttpPageFetcher {
    http: Arc<HttpClient>,
}

impl HttpPageFetcher {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn navigate(
        &self,
        url: &str,
        wait: WaitUntil,
        timeout: Duration,
    ) -> ScrapeResult<Document> {
        // A plain HTTP fetch satisfies both wait conditions the moment the
        // body is fully read.
        debug!("Navigating to {} (wait: {:?})", url, wait);
        let body = self.http.get_text(url, timeout).await?;
        Ok(Document::from_html(&body, url))
    }
}
