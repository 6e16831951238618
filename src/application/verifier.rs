//! Verification runner
//!
//! Walks the catalog strictly in order, fetches each title page through
//! the injected fetcher, and evaluates a verdict per entry. A failed page
//! degrades that entry to the sentinel and the run keeps going.

use crate::domain::catalog::{Catalog, CatalogEntry};
use crate::domain::verification::{EntryOutcome, FetchedScores};
use crate::infrastructure::config::FetchConfig;
use crate::infrastructure::extraction::ScoreExtractor;
use crate::infrastructure::page_fetcher::{PageFetcher, WaitUntil};
use crate::infrastructure::scrape_error::ScrapeResult;
use std::time::Duration;
use tracing::{debug, warn};

/// Sequential catalog verifier over an injected fetcher
pub struct ReferenceVerifier<F: PageFetcher> {
    fetcher: F,
    extractor: ScoreExtractor,
    navigation_timeout: Duration,
    request_delay: Duration,
}

impl<F: PageFetcher> ReferenceVerifier<F> {
    pub fn new(fetcher: F, config: &FetchConfig) -> ScrapeResult<Self> {
        let extractor = ScoreExtractor::new(Duration::from_millis(config.element_timeout_ms))?;
        Ok(Self {
            fetcher,
            extractor,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Borrow the injected fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and evaluate one entry
    ///
    /// A failed navigation degrades the entry instead of aborting the run.
    pub async fn verify_entry(&self, entry: &CatalogEntry) -> EntryOutcome {
        let url = entry.page_url();
        debug!("Verifying '{}' at {}", entry.title, url);
        let scores = match self
            .fetcher
            .navigate(&url, WaitUntil::DomContentLoaded, self.navigation_timeout)
            .await
        {
            Ok(doc) => self.extractor.scores(&doc),
            Err(error) => {
                warn!("Fetch failed for '{}': {}", entry.title, error);
                FetchedScores::unavailable()
            }
        };
        EntryOutcome::evaluate(entry.clone(), scores)
    }

    /// Verify the whole catalog in order
    pub async fn verify_all(&self, catalog: &Catalog) -> Vec<EntryOutcome> {
        self.verify_all_with(catalog, |_| {}).await
    }

    /// Verify the whole catalog, handing each outcome out as it lands
    ///
    /// Entries are processed one at a time in catalog order, with the
    /// configured pause between consecutive fetches.
    pub async fn verify_all_with<R>(&self, catalog: &Catalog, mut on_row: R) -> Vec<EntryOutcome>
    where
        R: FnMut(&EntryOutcome),
    {
        let mut outcomes = Vec::with_capacity(catalog.len());
        for (index, entry) in catalog.iter().enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            let outcome = self.verify_entry(entry).await;
            on_row(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }
}
