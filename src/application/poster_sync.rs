//! Poster synchronization
//!
//! Resolves each poster spec to a CDN URL, downloads the image, and saves
//! it through the conditional store. One failed item prints and logs a
//! single line and the run keeps going; progress goes to stdout in the
//! same shape for search-driven and known-path posters.

use crate::domain::catalog::{PosterSource, PosterSpec};
use crate::infrastructure::config::{tmdb, FetchConfig, PosterConfig};
use crate::infrastructure::extraction::PosterExtractor;
use crate::infrastructure::http_client::ImageDownloader;
use crate::infrastructure::images::{ImageStore, SaveOutcome};
use crate::infrastructure::page_fetcher::{PageFetcher, WaitUntil};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Counts for one poster sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosterSyncReport {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Sequential poster sync over an injected fetcher and downloader
pub struct PosterSync<F: PageFetcher, D: ImageDownloader> {
    fetcher: F,
    downloader: Arc<D>,
    store: ImageStore,
    extractor: PosterExtractor,
    navigation_timeout: Duration,
    download_timeout: Duration,
}

impl<F: PageFetcher, D: ImageDownloader> PosterSync<F, D> {
    pub fn new(
        fetcher: F,
        downloader: Arc<D>,
        fetch_config: &FetchConfig,
        poster_config: &PosterConfig,
    ) -> ScrapeResult<Self> {
        let extractor =
            PosterExtractor::new(Duration::from_millis(fetch_config.element_timeout_ms))?;
        Ok(Self {
            fetcher,
            downloader,
            store: ImageStore::new(&poster_config.dest_dir),
            extractor,
            navigation_timeout: Duration::from_secs(fetch_config.navigation_timeout_secs),
            download_timeout: Duration::from_secs(poster_config.download_timeout_secs),
        })
    }

    /// Borrow the injected fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve a spec to the CDN URL of its canonical-size image
    pub async fn resolve_poster_url(&self, spec: &PosterSpec) -> ScrapeResult<String> {
        match &spec.source {
            PosterSource::KnownPath(path) => Ok(tmdb::poster_url(path)),
            PosterSource::Search { query, kind } => {
                let url = tmdb::search_url(kind.search_segment(), query);
                let doc = self
                    .fetcher
                    .navigate(&url, WaitUntil::NetworkIdle, self.navigation_timeout)
                    .await?;
                self.extractor.poster_url(&doc)
            }
        }
    }

    /// Fetch one poster and push it through the conditional store
    pub async fn sync_one(&self, spec: &PosterSpec) -> ScrapeResult<SaveOutcome> {
        let url = self.resolve_poster_url(spec).await?;
        if matches!(spec.source, PosterSource::Search { .. }) {
            println!("  Found: {url}");
        }
        let bytes = self
            .downloader
            .download(&url, self.download_timeout)
            .await?;
        self.store.save_if_larger(&spec.filename, &bytes).await
    }

    /// Sync every poster, isolating failures per item
    pub async fn sync_all(&self, specs: &[PosterSpec]) -> ScrapeResult<PosterSyncReport> {
        self.store.ensure_dest_dir().await?;

        let mut report = PosterSyncReport {
            total: specs.len(),
            ..PosterSyncReport::default()
        };
        for spec in specs {
            match &spec.source {
                PosterSource::Search { query, .. } => {
                    println!("Fetching: {} -> {}", query, spec.filename);
                }
                PosterSource::KnownPath(_) => {
                    println!("Downloading {}...", spec.filename);
                }
            }
            match self.sync_one(spec).await {
                Ok(SaveOutcome::Saved { bytes, previous }) => {
                    println!("  ✓ Saved ({}KB, was {}KB)", bytes / 1024, previous / 1024);
                    report.updated += 1;
                }
                Ok(SaveOutcome::SkippedSmaller { bytes, existing }) => {
                    println!(
                        "  - Skipped (new {}KB <= existing {}KB)",
                        bytes / 1024,
                        existing / 1024
                    );
                    report.skipped += 1;
                }
                Err(error) => {
                    warn!("Poster sync failed for {}: {}", spec.filename, error);
                    if matches!(error, ScrapeError::ContentInvalid { .. }) {
                        println!("  ✗ Not an image");
                    } else {
                        println!("  ✗ Error: {error}");
                    }
                    report.failed += 1;
                }
            }
        }

        println!(
            "\nDone! {}/{} posters updated.",
            report.updated, report.total
        );
        info!(
            "Poster sync complete: {} updated, {} skipped, {} failed",
            report.updated, report.skipped, report.failed
        );
        Ok(report)
    }
}
