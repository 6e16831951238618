//! Poster extraction from search result pages
//!
//! Finds the first poster image on a TMDB search page and normalizes its
//! source URL: every size segment is rewritten to the canonical width and
//! relative paths are absolutized against the image host.

use crate::infrastructure::config::tmdb;
use crate::infrastructure::extraction::strategies::{ExtractionStrategy, SelectorStrategy};
use crate::infrastructure::page_fetcher::Document;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use regex::Regex;
use std::time::Duration;

const COMBINED_SIZE_PATTERN: &str = r"/t/p/w\d+_and_h\d+_\w+/";
const PLAIN_SIZE_PATTERN: &str = r"/t/p/w\d+/";

/// Extracts a normalized poster URL from a search result page
pub struct PosterExtractor {
    image_strategy: SelectorStrategy,
    combined_size: Regex,
    plain_size: Regex,
}

impl PosterExtractor {
    pub fn new(element_timeout: Duration) -> ScrapeResult<Self> {
        let image_strategy = SelectorStrategy::new(
            &[
                "img.poster".to_string(),
                r#"img[src*="/t/p/"]"#.to_string(),
            ],
            element_timeout,
        )?
        .with_attribute("src");
        let combined_size = Regex::new(COMBINED_SIZE_PATTERN).map_err(|e| {
            ScrapeError::invalid_locator(COMBINED_SIZE_PATTERN, &e.to_string())
        })?;
        let plain_size = Regex::new(PLAIN_SIZE_PATTERN)
            .map_err(|e| ScrapeError::invalid_locator(PLAIN_SIZE_PATTERN, &e.to_string()))?;
        Ok(Self {
            image_strategy,
            combined_size,
            plain_size,
        })
    }

    /// First poster image on the page, rewritten to the canonical size
    pub fn poster_url(&self, doc: &Document) -> ScrapeResult<String> {
        let src = self.image_strategy.extract(doc)?;
        Ok(self.rewrite_to_size(&src))
    }

    /// Rewrite any size segment to the canonical width and prefix the
    /// image host when the path is relative
    pub fn rewrite_to_size(&self, src: &str) -> String {
        let combined = self.combined_size.replace(src, tmdb::SIZE_SEGMENT);
        let sized = self.plain_size.replace(combined.as_ref(), tmdb::SIZE_SEGMENT);
        if sized.starts_with("http") {
            sized.into_owned()
        } else {
            format!("{}{}", tmdb::IMAGE_BASE, sized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(100);

    fn search_page(img: &str) -> Document {
        let body = format!("<html><body><div class=\"results\">{img}</div></body></html>");
        Document::from_html(&body, "https://www.themoviedb.org/search/movie?query=x")
    }

    #[test]
    fn rewrites_combined_size_segments() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        assert_eq!(
            extractor.rewrite_to_size("/t/p/w220_and_h330_face/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn rewrites_plain_size_segments() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        assert_eq!(
            extractor.rewrite_to_size("/t/p/w94/poster.jpg"),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
    }

    #[test]
    fn absolute_urls_keep_their_host() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        assert_eq!(
            extractor.rewrite_to_size("https://www.themoviedb.org/t/p/w300_and_h450_bestv2/x.jpg"),
            "https://www.themoviedb.org/t/p/w500/x.jpg"
        );
    }

    #[test]
    fn canonical_urls_pass_through_unchanged() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        assert_eq!(
            extractor.rewrite_to_size("https://image.tmdb.org/t/p/w500/kept.jpg"),
            "https://image.tmdb.org/t/p/w500/kept.jpg"
        );
    }

    #[test]
    fn extracts_first_poster_from_search_markup() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        let page = search_page(
            r#"<img class="poster" src="/t/p/w220_and_h330_face/first.jpg">
               <img class="poster" src="/t/p/w220_and_h330_face/second.jpg">"#,
        );

        let url = extractor.poster_url(&page).expect("poster found");
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/first.jpg");
    }

    #[test]
    fn falls_back_to_any_tmdb_image() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        let page = search_page(r#"<img src="https://image.tmdb.org/t/p/w94/tiny.jpg">"#);

        let url = extractor.poster_url(&page).expect("poster found");
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/tiny.jpg");
    }

    #[test]
    fn missing_poster_is_an_element_error() {
        let extractor = PosterExtractor::new(TIMEOUT).expect("builds");
        let page = search_page("<p>No results found</p>");

        assert!(matches!(
            extractor.poster_url(&page),
            Err(ScrapeError::ElementNotFound { .. })
        ));
    }
}
