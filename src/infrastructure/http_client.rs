//! HTTP client with rate limiting for respectful scraping
//!
//! One client instance backs a whole run: the cookie jar is the shared
//! browsing context reused across entries, and the rate limiter enforces
//! the politeness cap no matter which code path issues the request.

use crate::infrastructure::config::{FetchConfig, defaults};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::{
    Client, Response,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

/// HTTP client configuration
#[derive(Debug, Clone, serde::Serialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::NAVIGATION_TIMEOUT_SECS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
        }
    }
}

impl From<&FetchConfig> for HttpClientConfig {
    fn from(fetch: &FetchConfig) -> Self {
        Self {
            user_agent: fetch.user_agent.clone(),
            timeout_seconds: fetch.navigation_timeout_secs,
            max_requests_per_second: fetch.max_requests_per_second,
            follow_redirects: fetch.follow_redirects,
        }
    }
}

/// Rate-limited HTTP client shared by every fetch in a run
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ScrapeError::engine_init(&format!("invalid user agent: {e}")))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| ScrapeError::engine_init(&format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .ok_or_else(|| ScrapeError::engine_init("rate limit must be greater than 0"))?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Fetch a URL, waiting for the rate limiter first
    pub async fn get(&self, url: &str, timeout: Duration) -> ScrapeResult<Response> {
        self.rate_limiter.until_ready().await;

        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScrapeError::navigation_timeout(url, timeout.as_millis() as u64)
                } else {
                    ScrapeError::navigation(url, &e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ScrapeError::http_status(response.status().as_u16(), url));
        }

        debug!("Successfully fetched: {} ({})", url, response.status());
        Ok(response)
    }

    /// Fetch a URL and return the body as text
    pub async fn get_text(&self, url: &str, timeout: Duration) -> ScrapeResult<String> {
        let response = self.get(url, timeout).await?;
        response
            .text()
            .await
            .map_err(|e| ScrapeError::navigation(url, &format!("failed to read response body: {e}")))
    }

    /// Fetch a URL and return the raw body bytes
    pub async fn get_bytes(&self, url: &str, timeout: Duration) -> ScrapeResult<Vec<u8>> {
        let response = self.get(url, timeout).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScrapeError::navigation(url, &format!("failed to read response body: {e}")))?;
        Ok(bytes.to_vec())
    }

    /// Get the configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

/// Injected byte-download capability
///
/// The poster sync's second seam next to `PageFetcher`: image payloads go
/// through this trait so tests can feed bytes without a network.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Fetch the raw payload at a URL
    async fn download(&self, url: &str, timeout: Duration) -> ScrapeResult<Vec<u8>>;
}

#[async_trait]
impl ImageDownloader for HttpClient {
    async fn download(&self, url: &str, timeout: Duration) -> ScrapeResult<Vec<u8>> {
        self.get_bytes(url, timeout).await
    }
}
