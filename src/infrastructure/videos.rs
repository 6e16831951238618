//! Video link handling
//!
//! Recognizes the three common watch-link shapes (short link, watch page,
//! embed frame), extracts the 11-character video id, and resolves a clean
//! display title off the watch page.

use crate::infrastructure::config::youtube;
use crate::infrastructure::config::FetchConfig;
use crate::infrastructure::extraction::strategies::{
    ExtractionChain, SelectorStrategy, TextPatternStrategy,
};
use crate::infrastructure::page_fetcher::{Document, PageFetcher, WaitUntil};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

static SHORT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})").expect("pattern compiles"));
static WATCH_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})").expect("pattern compiles"));
static EMBED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/embed/([a-zA-Z0-9_-]{11})").expect("pattern compiles"));
static TITLE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*YouTube\s*$").expect("pattern compiles"));

/// Validated 11-character video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 11
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ScrapeError::content_invalid(&format!(
                "'{s}' is not an 11-character video id"
            )))
        }
    }
}

/// Pull the video id out of any recognized link shape
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    for pattern in [&*SHORT_LINK, &*WATCH_LINK, &*EMBED_LINK] {
        if let Some(caps) = pattern.captures(url) {
            if let Some(id) = caps.get(1) {
                return Some(VideoId(id.as_str().to_string()));
            }
        }
    }
    None
}

/// Canonical watch page for a video
pub fn watch_url(id: &VideoId) -> String {
    youtube::watch_url(id.as_str())
}

/// High-quality thumbnail for a video
pub fn thumbnail_url(id: &VideoId) -> String {
    youtube::thumbnail_url(id.as_str())
}

/// Resolves display titles off watch pages
pub struct VideoScraper {
    title_chain: ExtractionChain,
    navigation_timeout: Duration,
}

impl VideoScraper {
    pub fn new(config: &FetchConfig) -> ScrapeResult<Self> {
        let element_timeout = Duration::from_millis(config.element_timeout_ms);
        let title_chain = ExtractionChain::new("title")
            .with_strategy(SelectorStrategy::new(&["title".to_string()], element_timeout)?)
            .with_strategy(
                TextPatternStrategy::new(r"<title>([^<]+)</title>", element_timeout)?
                    .over_raw_html(),
            );
        Ok(Self {
            title_chain,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Fetch the watch page and resolve the cleaned title
    pub async fn title(&self, fetcher: &dyn PageFetcher, id: &VideoId) -> ScrapeResult<String> {
        let url = watch_url(id);
        let doc = fetcher
            .navigate(&url, WaitUntil::DomContentLoaded, self.navigation_timeout)
            .await?;
        self.extract_title(&doc)
    }

    /// Resolve the cleaned title from an already fetched watch page
    pub fn extract_title(&self, doc: &Document) -> ScrapeResult<String> {
        let raw = self.title_chain.extract(doc)?;
        let cleaned = clean_title(&raw);
        if cleaned.is_empty() {
            return Err(ScrapeError::content_invalid(
                "video title is empty after cleanup",
            ));
        }
        Ok(cleaned)
    }
}

/// Unescape the common entities and strip the site suffix
pub fn clean_title(raw: &str) -> String {
    let unescaped = basic_unescape(raw);
    TITLE_SUFFIX.replace(&unescaped, "").trim().to_string()
}

// The ampersand entity goes last so already-unescaped entity names are
// not unescaped a second time.
fn basic_unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/watch?v=aB3_x-9Yz01", "aB3_x-9Yz01")]
    #[case("https://www.youtube.com/embed/aB3_x-9Yz01?rel=0", "aB3_x-9Yz01")]
    #[case("http://youtu.be/aB3_x-9Yz01?t=30", "aB3_x-9Yz01")]
    fn recognizes_watch_link_shapes(#[case] url: &str, #[case] expected: &str) {
        let id = extract_video_id(url).expect("id recognized");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("https://example.com/watch?v=dQw4w9WgXcQ")]
    #[case("https://youtu.be/short")]
    #[case("not a url at all")]
    fn rejects_unrecognized_links(#[case] url: &str) {
        assert!(extract_video_id(url).is_none());
    }

    #[test]
    fn video_id_parsing_validates_shape() {
        assert!("dQw4w9WgXcQ".parse::<VideoId>().is_ok());
        assert!("tooshort".parse::<VideoId>().is_err());
        assert!("has spaces!!".parse::<VideoId>().is_err());
        assert!("exactly11ch".parse::<VideoId>().is_ok());
    }

    #[test]
    fn urls_are_built_from_the_id() {
        let id: VideoId = "dQw4w9WgXcQ".parse().expect("valid id");
        assert_eq!(
            watch_url(&id),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            thumbnail_url(&id),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[rstest]
    #[case("Some Film Trailer - YouTube", "Some Film Trailer")]
    #[case("Some Film Trailer   -   YouTube  ", "Some Film Trailer")]
    #[case("Plain Title", "Plain Title")]
    #[case("Tom &amp; Jerry - YouTube", "Tom & Jerry")]
    #[case("He said &quot;go&quot; &#39;now&#39;", "He said \"go\" 'now'")]
    fn titles_are_unescaped_and_stripped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_title(raw), expected);
    }

    #[test]
    fn extract_title_prefers_the_title_element() {
        let config = FetchConfig::default();
        let scraper = VideoScraper::new(&config).expect("builds");
        let doc = Document::from_html(
            "<html><head><title>Opening Scene - YouTube</title></head><body></body></html>",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        );

        assert_eq!(scraper.extract_title(&doc).expect("title"), "Opening Scene");
    }

    #[test]
    fn extract_title_fails_on_pages_without_a_title() {
        let config = FetchConfig::default();
        let scraper = VideoScraper::new(&config).expect("builds");
        let doc = Document::from_html(
            "<html><body><p>no title here</p></body></html>",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        );

        assert!(scraper.extract_title(&doc).is_err());
    }
}
