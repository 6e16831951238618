//! Error types for page fetching and field extraction
//!
//! One taxonomy covers the whole fetch-and-extract pipeline so callers can
//! classify failures at the entry boundary: most variants degrade a single
//! catalog entry, a few indicate the run cannot start at all.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("No element matched selector '{selector}'")]
    ElementNotFound { selector: String },

    #[error("Element '{locator}' did not yield text within {timeout_ms}ms")]
    ElementTimeout { locator: String, timeout_ms: u64 },

    #[error("Pattern '{pattern}' not found in page text")]
    PatternNotFound { pattern: String },

    #[error("Invalid locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("Content validation failed: {reason}")]
    ContentInvalid { reason: String },

    #[error("All extraction strategies failed for '{field}' (tried: {tried:?})")]
    StrategiesExhausted { field: String, tried: Vec<String> },

    #[error("File operation failed on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Fetch engine initialization failed: {reason}")]
    EngineInit { reason: String },
}

impl ScrapeError {
    /// Create a navigation error from a transport-level failure
    pub fn navigation(url: &str, reason: &str) -> Self {
        Self::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn navigation_timeout(url: &str, timeout_ms: u64) -> Self {
        Self::NavigationTimeout {
            url: url.to_string(),
            timeout_ms,
        }
    }

    pub fn http_status(status: u16, url: &str) -> Self {
        Self::HttpStatus {
            status,
            url: url.to_string(),
        }
    }

    pub fn element_not_found(selector: &str) -> Self {
        Self::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    pub fn pattern_not_found(pattern: &str) -> Self {
        Self::PatternNotFound {
            pattern: pattern.to_string(),
        }
    }

    pub fn invalid_locator(locator: &str, reason: &str) -> Self {
        Self::InvalidLocator {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn content_invalid(reason: &str) -> Self {
        Self::ContentInvalid {
            reason: reason.to_string(),
        }
    }

    /// Create an exhausted-strategies error carrying what was tried
    pub fn strategies_exhausted(field: &str, tried: Vec<String>) -> Self {
        Self::StrategiesExhausted {
            field: field.to_string(),
            tried,
        }
    }

    pub fn io(path: &str, reason: &str) -> Self {
        Self::Io {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn engine_init(reason: &str) -> Self {
        Self::EngineInit {
            reason: reason.to_string(),
        }
    }

    /// Check if this error is recoverable at the per-entry boundary
    ///
    /// Recoverable errors degrade one catalog entry to the sentinel and the
    /// run continues. Non-recoverable ones mean the run itself is broken
    /// (bad compiled-in locators, engine that never came up).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Navigation { .. } => true,
            Self::NavigationTimeout { .. } => true,
            Self::HttpStatus { .. } => true,
            Self::ElementNotFound { .. } => true,
            Self::ElementTimeout { .. } => true,
            Self::PatternNotFound { .. } => true,
            Self::ContentInvalid { .. } => true,
            Self::StrategiesExhausted { .. } => true,
            Self::Io { .. } => true,
            Self::InvalidLocator { .. } => false,
            Self::EngineInit { .. } => false,
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_level_failures_are_recoverable() {
        assert!(ScrapeError::navigation("https://example.com", "dns failure").is_recoverable());
        assert!(ScrapeError::navigation_timeout("https://example.com", 15000).is_recoverable());
        assert!(ScrapeError::http_status(503, "https://example.com").is_recoverable());
        assert!(ScrapeError::element_not_found(".score").is_recoverable());
        assert!(ScrapeError::pattern_not_found(r"\d+").is_recoverable());
    }

    #[test]
    fn startup_failures_are_not_recoverable() {
        assert!(!ScrapeError::invalid_locator("div[", "unclosed bracket").is_recoverable());
        assert!(!ScrapeError::engine_init("client build failed").is_recoverable());
    }

    #[test]
    fn exhausted_strategies_lists_what_was_tried() {
        let err = ScrapeError::strategies_exhausted(
            "imdb_rating",
            vec!["selector[.score]".to_string(), "pattern[\\d+]".to_string()],
        );
        let message = err.to_string();
        assert!(message.contains("imdb_rating"));
        assert!(message.contains("selector[.score]"));
    }
}
