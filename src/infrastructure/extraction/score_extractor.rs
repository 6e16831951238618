//! Title-page score extraction
//!
//! Resolves the community rating and the Metascore off a fetched title
//! page. The two fields degrade independently: a missing Metascore never
//! blocks the rating, and vice versa.

use crate::domain::verification::FetchedScores;
use crate::infrastructure::extraction::strategies::{
    ExtractionChain, SelectorStrategy, TextPatternStrategy,
};
use crate::infrastructure::page_fetcher::Document;
use crate::infrastructure::scrape_error::ScrapeResult;
use std::time::Duration;

/// Locator set for the score fields, overridable when markup drifts
#[derive(Debug, Clone)]
pub struct ScoreSelectors {
    pub rating_selectors: Vec<String>,
    pub rating_fallback_pattern: String,
    pub metascore_selectors: Vec<String>,
    pub metascore_fallback_pattern: String,
}

impl Default for ScoreSelectors {
    fn default() -> Self {
        Self {
            rating_selectors: vec![
                r#"[data-testid="hero-rating-bar__aggregate-rating__score"] span"#.to_string(),
            ],
            rating_fallback_pattern: r"([0-9]{1,2}\.[0-9])\s*/\s*10".to_string(),
            metascore_selectors: vec![
                ".metacritic-score-box".to_string(),
                r#"[data-testid="hero-rating-bar__aggregate-rating"] .score-meta"#.to_string(),
            ],
            metascore_fallback_pattern: r"([0-9]{1,3})\s*Metascore".to_string(),
        }
    }
}

/// Extracts both score fields from a title page
pub struct ScoreExtractor {
    rating_chain: ExtractionChain,
    metascore_chain: ExtractionChain,
}

impl ScoreExtractor {
    /// Build the extractor with the default locator set
    pub fn new(element_timeout: Duration) -> ScrapeResult<Self> {
        Self::with_config(&ScoreSelectors::default(), element_timeout)
    }

    /// Build the extractor with an explicit locator set
    pub fn with_config(config: &ScoreSelectors, element_timeout: Duration) -> ScrapeResult<Self> {
        let rating_chain = ExtractionChain::new("rating")
            .with_strategy(SelectorStrategy::new(
                &config.rating_selectors,
                element_timeout,
            )?)
            .with_strategy(TextPatternStrategy::new(
                &config.rating_fallback_pattern,
                element_timeout,
            )?);
        let metascore_chain = ExtractionChain::new("metascore")
            .with_strategy(SelectorStrategy::new(
                &config.metascore_selectors,
                element_timeout,
            )?)
            .with_strategy(TextPatternStrategy::new(
                &config.metascore_fallback_pattern,
                element_timeout,
            )?);
        Ok(Self {
            rating_chain,
            metascore_chain,
        })
    }

    /// Pull both fields, each degrading to the sentinel on its own
    pub fn scores(&self, doc: &Document) -> FetchedScores {
        FetchedScores {
            rating: self.rating_chain.extract_or_unavailable(doc),
            metascore: self.metascore_chain.extract_or_unavailable(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verification::UNAVAILABLE;

    const TIMEOUT: Duration = Duration::from_millis(100);

    fn title_page(rating: &str, metascore: &str) -> Document {
        let body = format!(
            r#"<html><body>
                <div data-testid="hero-rating-bar__aggregate-rating">
                  <div data-testid="hero-rating-bar__aggregate-rating__score">
                    <span>{rating}</span><span>/</span><span>10</span>
                  </div>
                  <span class="score-meta">{metascore}</span>
                </div>
            </body></html>"#
        );
        Document::from_html(&body, "https://example.com/title/tt0000001/")
    }

    #[test]
    fn extracts_both_fields_from_structured_markup() {
        let extractor = ScoreExtractor::new(TIMEOUT).expect("builds");
        let scores = extractor.scores(&title_page("9.4", "88"));

        assert_eq!(scores.rating, "9.4");
        assert_eq!(scores.metascore, "88");
    }

    #[test]
    fn falls_back_to_text_patterns_when_selectors_miss() {
        let extractor = ScoreExtractor::new(TIMEOUT).expect("builds");
        let page = Document::from_html(
            "<html><body><p>Users rate this 9.1/10 overall. 74 Metascore</p></body></html>",
            "https://example.com/title/tt0000002/",
        );
        let scores = extractor.scores(&page);

        assert_eq!(scores.rating, "9.1");
        assert_eq!(scores.metascore, "74");
    }

    #[test]
    fn missing_metascore_does_not_block_the_rating() {
        let extractor = ScoreExtractor::new(TIMEOUT).expect("builds");
        let page = Document::from_html(
            r#"<html><body>
                <div data-testid="hero-rating-bar__aggregate-rating__score">
                  <span>8.3</span><span>/</span><span>10</span>
                </div>
            </body></html>"#,
            "https://example.com/title/tt0000003/",
        );
        let scores = extractor.scores(&page);

        assert_eq!(scores.rating, "8.3");
        assert_eq!(scores.metascore, UNAVAILABLE);
    }

    #[test]
    fn empty_page_degrades_every_field() {
        let extractor = ScoreExtractor::new(TIMEOUT).expect("builds");
        let page = Document::from_html(
            "<html><body></body></html>",
            "https://example.com/title/tt0000004/",
        );
        let scores = extractor.scores(&page);

        assert_eq!(scores.rating, UNAVAILABLE);
        assert_eq!(scores.metascore, UNAVAILABLE);
    }

    #[test]
    fn metacritic_box_takes_priority_over_meta_span() {
        let extractor = ScoreExtractor::new(TIMEOUT).expect("builds");
        let page = Document::from_html(
            r#"<html><body>
                <div class="metacritic-score-box">82</div>
                <div data-testid="hero-rating-bar__aggregate-rating">
                  <span class="score-meta">41</span>
                </div>
            </body></html>"#,
            "https://example.com/title/tt0000005/",
        );
        let scores = extractor.scores(&page);

        assert_eq!(scores.metascore, "82");
    }
}
