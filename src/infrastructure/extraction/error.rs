//! Extraction error types
//!
//! The extraction layer shares the infrastructure-wide scrape error
//! taxonomy; this module re-exports it so extraction code reads from a
//! local path.

pub use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
