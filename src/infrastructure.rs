//! Infrastructure layer for fetching, extraction, and external integrations
//!
//! This module provides the shared HTTP client, the page-fetching seam the
//! verifier is tested through, extraction strategies, poster image storage,
//! video link handling, and the configuration and logging stack.

pub mod config; // Configuration loading plus site URL helpers
pub mod extraction; // Strategy chains and the per-site extractors
pub mod http_client;
pub mod images;
pub mod logging; // Logging infrastructure
pub mod page_fetcher;
pub mod scrape_error; // Shared error taxonomy
pub mod videos;

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, FetchConfig, LoggingConfig, PosterConfig};
pub use extraction::{PosterExtractor, ScoreExtractor, ScoreSelectors};
pub use http_client::{HttpClient, HttpClientConfig, ImageDownloader};
pub use images::{ImageKind, ImageStore, SaveOutcome};
pub use logging::{init_logging, init_logging_with_config, shutdown_logging};
pub use page_fetcher::{Document, ElementHandle, HttpPageFetcher, PageFetcher, WaitUntil};
pub use scrape_error::{ScrapeError, ScrapeResult};
pub use videos::{extract_video_id, VideoId, VideoScraper};
