//! Watchlist verifier
//!
//! Fetches every catalog entry's title page and prints the fixed-width
//! drift report. Exit code 0 means every score matched, 2 means at least
//! one mismatch was found, 3 means some pages could not be fetched but
//! nothing mismatched.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use watchlist_verifier_lib::application::{report, ReferenceVerifier};
use watchlist_verifier_lib::domain::{Catalog, RunSummary};
use watchlist_verifier_lib::infrastructure::logging;
use watchlist_verifier_lib::infrastructure::{AppConfig, HttpClient, HttpPageFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging_with_config(&config.logging)?;

    let catalog = Catalog::reference();
    catalog
        .validate()
        .context("Built-in catalog is malformed")?;

    let http = Arc::new(
        HttpClient::new((&config.fetch).into()).context("Failed to build the HTTP client")?,
    );
    let fetcher = HttpPageFetcher::new(http);
    let verifier =
        ReferenceVerifier::new(fetcher, &config.fetch).context("Failed to build the verifier")?;

    info!("Verifying {} catalog entries", catalog.len());
    println!("{}", report::render_header());
    let outcomes = verifier
        .verify_all_with(&catalog, |outcome| {
            println!("{}", report::render_row(outcome));
        })
        .await;

    if let Some(section) = report::render_mismatch_section(&outcomes) {
        println!();
        println!("{section}");
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    info!(
        "Run finished: {} matched, {} mismatched, {} unavailable",
        summary.matched, summary.mismatched, summary.unavailable
    );

    // Flush file logging before the explicit exit skips Drop handlers.
    logging::shutdown_logging();
    std::process::exit(summary.status().exit_code());
}
