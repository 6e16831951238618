//! Domain module - Catalog data and verification logic
//!
//! This module contains the reference catalog, the poster lists, and the
//! pure comparison logic that turns fetched scores into verdicts.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod catalog;
pub mod verification;

// Re-export commonly used items for convenience
pub use catalog::{
    poster_specs, Catalog, CatalogEntry, CatalogError, MediaKind, PosterSource, PosterSpec,
};
pub use verification::{
    mismatches, EntryOutcome, FetchedScores, Mismatch, RunStatus, RunSummary, Verdict, UNAVAILABLE,
};
