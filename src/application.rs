//! Application layer module
//!
//! This module contains the services that orchestrate the domain logic:
//! the verification run, report rendering, and the poster sync.

pub mod poster_sync;
pub mod report;
pub mod verifier;

pub use poster_sync::{PosterSync, PosterSyncReport};
pub use verifier::ReferenceVerifier;
