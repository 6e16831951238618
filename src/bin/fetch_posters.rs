//! Poster sync job
//!
//! Refreshes the site's poster images from TMDB: search-driven entries
//! plus known stable paths, each saved only when the downloaded image is
//! strictly larger than the file already on disk. Per-item failures are
//! reported and skipped; the job itself always completes.

use anyhow::Context;
use std::sync::Arc;
use watchlist_verifier_lib::application::PosterSync;
use watchlist_verifier_lib::domain::poster_specs;
use watchlist_verifier_lib::infrastructure::logging;
use watchlist_verifier_lib::infrastructure::{AppConfig, HttpClient, HttpPageFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging_with_config(&config.logging)?;

    let http = Arc::new(
        HttpClient::new((&config.fetch).into()).context("Failed to build the HTTP client")?,
    );
    let fetcher = HttpPageFetcher::new(Arc::clone(&http));
    let sync = PosterSync::new(fetcher, http, &config.fetch, &config.posters)
        .context("Failed to build the poster sync")?;

    println!("Saving to: {}\n", config.posters.dest_dir);

    let specs = poster_specs();
    sync.sync_all(&specs)
        .await
        .context("Poster sync could not run")?;

    logging::shutdown_logging();
    Ok(())
}
