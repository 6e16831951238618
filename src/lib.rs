//! Watchlist Verifier - Reference score and poster maintenance
//!
//! This crate checks a compiled-in watchlist against live IMDb pages,
//! reports score drift in a fixed-width table, and keeps the site's poster
//! images in sync with TMDB.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the types the binaries and tests reach for most
pub use application::{PosterSync, PosterSyncReport, ReferenceVerifier};
pub use domain::{
    poster_specs, Catalog, CatalogEntry, CatalogError, EntryOutcome, FetchedScores, MediaKind,
    Mismatch, PosterSource, PosterSpec, RunStatus, RunSummary, Verdict, UNAVAILABLE,
};
pub use infrastructure::{
    AppConfig, ConfigError, Document, HttpClient, HttpClientConfig, HttpPageFetcher,
    ImageDownloader, PageFetcher, ScrapeError, ScrapeResult, WaitUntil,
};
