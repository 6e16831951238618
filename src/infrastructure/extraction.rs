//! Field extraction over fetched documents
//!
//! Scraped fields are resolved by ordered strategy chains: structured
//! selectors first, text-pattern fallbacks behind them. Extractors own the
//! chains for one page family (title scores, poster search results) and
//! degrade to the sentinel value instead of failing an entry.

pub mod error;
pub mod poster_extractor;
pub mod score_extractor;
pub mod strategies;

pub use error::{ScrapeError, ScrapeResult};
pub use poster_extractor::PosterExtractor;
pub use score_extractor::{ScoreExtractor, ScoreSelectors};
pub use strategies::{
    extract_field, ExtractionChain, ExtractionStrategy, SelectorStrategy, TextPatternStrategy,
};
