//! Ordered extraction strategies
//!
//! A field is resolved by trying strategies in order until one produces a
//! non-empty value. When every strategy misses, the chain reports the
//! descriptions it tried so the failure names what was attempted.

use crate::domain::verification::UNAVAILABLE;
use crate::infrastructure::page_fetcher::Document;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use regex::Regex;
use scraper::Selector;
use std::time::Duration;
use tracing::{debug, warn};

/// One way of pulling a field out of a document
pub trait ExtractionStrategy: Send + Sync {
    /// Short description used in exhaustion errors and logs
    fn describe(&self) -> String;

    /// Attempt the extraction
    fn extract(&self, doc: &Document) -> ScrapeResult<String>;
}

/// CSS selector lookup, optionally reading an attribute
///
/// Holds a list of selectors tried in order so markup drift can be
/// absorbed by appending alternatives.
pub struct SelectorStrategy {
    selectors: Vec<Selector>,
    raw: Vec<String>,
    attribute: Option<String>,
    element_timeout: Duration,
}

impl SelectorStrategy {
    /// Compile a selector list; invalid entries are skipped with a warning
    pub fn new(selectors: &[String], element_timeout: Duration) -> ScrapeResult<Self> {
        let mut compiled = Vec::with_capacity(selectors.len());
        let mut raw = Vec::with_capacity(selectors.len());
        for source in selectors {
            match Selector::parse(source) {
                Ok(selector) => {
                    compiled.push(selector);
                    raw.push(source.clone());
                }
                Err(e) => warn!("Skipping invalid selector '{}': {:?}", source, e),
            }
        }
        if compiled.is_empty() {
            return Err(ScrapeError::invalid_locator(
                &selectors.join(", "),
                "no selector in the list compiled",
            ));
        }
        Ok(Self {
            selectors: compiled,
            raw,
            attribute: None,
            element_timeout,
        })
    }

    /// Read an attribute value instead of the text content
    pub fn with_attribute(mut self, name: &str) -> Self {
        self.attribute = Some(name.to_string());
        self
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn describe(&self) -> String {
        format!("selector[{}]", self.raw.join(", "))
    }

    fn extract(&self, doc: &Document) -> ScrapeResult<String> {
        for selector in &self.selectors {
            if let Some(handle) = doc.find_by_selector(selector) {
                let value = match &self.attribute {
                    Some(name) => handle.attr(name),
                    None => Some(handle.text(self.element_timeout)?),
                };
                if let Some(text) = value {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        return Ok(trimmed.to_string());
                    }
                }
            }
        }
        Err(ScrapeError::element_not_found(&self.raw.join(", ")))
    }
}

/// Regex lookup over the page text
///
/// Matches the visible text by default; `over_raw_html` switches to the
/// serialized markup for content that never renders.
pub struct TextPatternStrategy {
    pattern: Regex,
    element_timeout: Duration,
    raw_html: bool,
}

impl TextPatternStrategy {
    pub fn new(pattern: &str, element_timeout: Duration) -> ScrapeResult<Self> {
        let compiled =
            Regex::new(pattern).map_err(|e| ScrapeError::invalid_locator(pattern, &e.to_string()))?;
        Ok(Self {
            pattern: compiled,
            element_timeout,
            raw_html: false,
        })
    }

    /// Match against the serialized HTML instead of the visible text
    pub fn over_raw_html(mut self) -> Self {
        self.raw_html = true;
        self
    }
}

impl ExtractionStrategy for TextPatternStrategy {
    fn describe(&self) -> String {
        format!("text[{}]", self.pattern.as_str())
    }

    fn extract(&self, doc: &Document) -> ScrapeResult<String> {
        let matched = if self.raw_html {
            doc.find_in_html(&self.pattern)
                .ok_or_else(|| ScrapeError::pattern_not_found(self.pattern.as_str()))?
        } else {
            let handle = doc
                .find_by_text(&self.pattern)
                .ok_or_else(|| ScrapeError::pattern_not_found(self.pattern.as_str()))?;
            handle.text(self.element_timeout)?
        };
        let trimmed = matched.trim();
        if trimmed.is_empty() {
            return Err(ScrapeError::pattern_not_found(self.pattern.as_str()));
        }
        Ok(trimmed.to_string())
    }
}

/// Ordered strategies for one named field
pub struct ExtractionChain {
    field: String,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractionChain {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Name of the field this chain resolves
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Try every strategy in order; the first non-empty value wins
    pub fn extract(&self, doc: &Document) -> ScrapeResult<String> {
        let mut tried = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match strategy.extract(doc) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    debug!(
                        "Strategy {} missed for '{}': {}",
                        strategy.describe(),
                        self.field,
                        error
                    );
                    tried.push(strategy.describe());
                }
            }
        }
        Err(ScrapeError::strategies_exhausted(&self.field, tried))
    }

    /// Degrade to the sentinel instead of failing the entry
    pub fn extract_or_unavailable(&self, doc: &Document) -> String {
        match self.extract(doc) {
            Ok(value) => value,
            Err(error) => {
                debug!(
                    "Field '{}' unavailable on {}: {}",
                    self.field,
                    doc.url(),
                    error
                );
                UNAVAILABLE.to_string()
            }
        }
    }
}

/// One-off two-tier lookup: structured selector first, text pattern second
///
/// A locator that does not compile counts as a miss for its tier. Both
/// tiers missing degrades to the sentinel instead of failing the entry.
pub fn extract_field(
    doc: &Document,
    primary_selector: &str,
    fallback_pattern: &str,
    element_timeout: Duration,
) -> String {
    let mut chain = ExtractionChain::new(primary_selector);
    match SelectorStrategy::new(&[primary_selector.to_string()], element_timeout) {
        Ok(primary) => chain = chain.with_strategy(primary),
        Err(error) => debug!("Primary locator '{}' unusable: {}", primary_selector, error),
    }
    match TextPatternStrategy::new(fallback_pattern, element_timeout) {
        Ok(fallback) => chain = chain.with_strategy(fallback),
        Err(error) => debug!("Fallback pattern '{}' unusable: {}", fallback_pattern, error),
    }
    chain.extract_or_unavailable(doc)
}
