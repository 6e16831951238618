//! Reference catalog
//!
//! The watchlist lives in code: every entry carries the display title, the
//! IMDb id, and the rating the site currently shows. Verification compares
//! these scores against the live pages, and the poster lists drive the
//! image sync.

use crate::infrastructure::config::imdb;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static IMDB_ID_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tt[0-9]+$").expect("pattern compiles"));

/// Validation failure in a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog is empty")]
    Empty,

    #[error("Entry {index} ('{title}') is malformed: {reason}")]
    MalformedEntry {
        index: usize,
        title: String,
        reason: String,
    },
}

/// One watchlist entry with the score the site currently displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub imdb_id: String,
    pub expected_rating: String,
}

impl CatalogEntry {
    pub fn new(title: &str, imdb_id: &str, expected_rating: &str) -> Self {
        Self {
            title: title.to_string(),
            imdb_id: imdb_id.to_string(),
            expected_rating: expected_rating.to_string(),
        }
    }

    /// Title page this entry is verified against
    pub fn page_url(&self) -> String {
        imdb::title_url(&self.imdb_id)
    }
}

/// Ordered collection of entries to verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The maintained watchlist with the ratings currently on the site
    pub fn reference() -> Self {
        let entries = REFERENCE_SCORES
            .iter()
            .map(|&(title, imdb_id, expected_rating)| {
                CatalogEntry::new(title, imdb_id, expected_rating)
            })
            .collect();
        Self { entries }
    }

    /// Reject empty catalogs and malformed entries before any fetching
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(CatalogError::MalformedEntry {
                    index,
                    title: entry.title.clone(),
                    reason: "title is empty".to_string(),
                });
            }
            if !IMDB_ID_SHAPE.is_match(&entry.imdb_id) {
                return Err(CatalogError::MalformedEntry {
                    index,
                    title: entry.title.clone(),
                    reason: format!("imdb id '{}' is not tt-prefixed", entry.imdb_id),
                });
            }
            if entry.expected_rating.trim().is_empty() {
                return Err(CatalogError::MalformedEntry {
                    index,
                    title: entry.title.clone(),
                    reason: "expected rating is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search section a poster query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Tv,
    Movie,
}

impl MediaKind {
    /// URL path segment for the search section
    pub fn search_segment(&self) -> &'static str {
        match self {
            MediaKind::Tv => "tv",
            MediaKind::Movie => "movie",
        }
    }
}

/// Where a poster image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    /// Search the site and take the first result's poster
    Search { query: String, kind: MediaKind },
    /// Known CDN image path, no search needed
    KnownPath(String),
}

/// One poster to fetch and the filename it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterSpec {
    pub filename: String,
    pub source: PosterSource,
}

/// Posters the sync maintains: search-driven entries first, then entries
/// with a known CDN path
pub fn poster_specs() -> Vec<PosterSpec> {
    let searches = POSTER_SEARCHES
        .iter()
        .map(|&(query, filename, kind)| PosterSpec {
            filename: filename.to_string(),
            source: PosterSource::Search {
                query: query.to_string(),
                kind,
            },
        });
    let known = KNOWN_POSTER_PATHS
        .iter()
        .map(|&(filename, path)| PosterSpec {
            filename: filename.to_string(),
            source: PosterSource::KnownPath(path.to_string()),
        });
    searches.chain(known).collect()
}

// All items from the watching page with their IMDb ids
const REFERENCE_SCORES: &[(&str, &str, &str)] = &[
    // Series
    ("Band of Brothers", "tt0185906", "9.4"),
    ("The Wire", "tt0306414", "9.3"),
    ("The Sopranos", "tt0141842", "9.2"),
    ("Game of Thrones", "tt0944947", "9.2"),
    ("Sherlock", "tt1475582", "9.1"),
    ("The Office", "tt0386676", "9.0"),
    ("Succession", "tt7660850", "8.8"),
    ("Boardwalk Empire", "tt0979432", "8.6"),
    ("Homeland", "tt1796960", "8.3"),
    ("The Killing", "tt1637727", "8.3"),
    // Movies: Crime & Drama
    ("The Godfather", "tt0068646", "9.2"),
    ("Pulp Fiction", "tt0110912", "8.9"),
    ("City of God", "tt0317248", "8.6"),
    ("The Departed", "tt0407887", "8.5"),
    ("Oldboy", "tt0364569", "8.4"),
    ("Reservoir Dogs", "tt0105236", "8.3"),
    ("Snatch", "tt0208092", "8.3"),
    ("There Will Be Blood", "tt0469494", "8.2"),
    ("Taxi Driver", "tt0075314", "8.2"),
    ("The Wolf of Wall Street", "tt0993846", "8.2"),
    ("Lock Stock and Two Smoking Barrels", "tt0120735", "8.2"),
    ("Nine Queens", "tt0247586", "8.1"),
    ("The Irishman", "tt1302006", "7.8"),
    ("The Girl with the Dragon Tattoo", "tt1568346", "7.8"),
    ("Zodiac", "tt0443706", "7.7"),
    ("Once Upon a Time in Hollywood", "tt7131622", "7.6"),
    ("Gangs of New York", "tt0217505", "7.5"),
    // Movies: Sci-Fi & Thriller
    ("The Dark Knight", "tt0468569", "9.0"),
    ("Inception", "tt1375666", "8.8"),
    ("Fight Club", "tt0137523", "8.8"),
    ("The Good the Bad and the Ugly", "tt0060196", "8.8"),
    ("The Matrix", "tt0133093", "8.7"),
    ("Apocalypse Now", "tt0078788", "8.5"),
    ("Gladiator", "tt0172495", "8.5"),
    ("Django Unchained", "tt1853728", "8.5"),
    ("Dune Part Two", "tt15239678", "8.5"),
    ("Inglourious Basterds", "tt0361748", "8.4"),
    ("Full Metal Jacket", "tt0093058", "8.3"),
    ("Shutter Island", "tt1130884", "8.2"),
    ("Dune", "tt1160419", "8.0"),
    ("Sin City", "tt0401792", "8.0"),
    ("Drive", "tt0780504", "7.8"),
    ("Watchmen", "tt0409459", "7.6"),
    ("The Assassination of Jesse James", "tt0443680", "7.5"),
    // Movies: Comedy & Indie
    ("The Big Lebowski", "tt0118715", "8.1"),
    ("The Grand Budapest Hotel", "tt2278388", "8.1"),
    ("Little Miss Sunshine", "tt0449059", "7.8"),
    ("Midnight in Paris", "tt1605783", "7.7"),
    ("Babel", "tt0449467", "7.4"),
    ("Blue Jasmine", "tt2334873", "7.3"),
    ("The Darjeeling Limited", "tt0838221", "7.2"),
    ("Vicky Cristina Barcelona", "tt0497465", "7.1"),
    // Anime
    ("Attack on Titan", "tt2560140", "9.1"),
    ("Cowboy Bebop", "tt0213338", "8.9"),
    ("Berserk", "tt0318871", "8.7"),
    ("Ghost in the Shell", "tt0113568", "8.0"),
    ("Akira", "tt0094625", "8.0"),
    // Animation
    ("Rick and Morty", "tt2861424", "9.1"),
    ("Arcane", "tt11126994", "9.0"),
    ("Gravity Falls", "tt1865718", "8.9"),
    ("BoJack Horseman", "tt3398228", "8.8"),
    ("Samurai Jack", "tt0278238", "8.5"),
    ("Love Death Robots", "tt9561862", "8.4"),
    ("Final Space", "tt6317068", "8.2"),
    ("Daria", "tt0118298", "7.8"),
];

// Posters fetched by search, small images that need better versions
const POSTER_SEARCHES: &[(&str, &str, MediaKind)] = &[
    ("The Irishman", "the-irishman.jpg", MediaKind::Movie),
    ("Full Metal Jacket", "full-metal-jacket.jpg", MediaKind::Movie),
    ("Snatch", "snatch.jpg", MediaKind::Movie),
    ("Zodiac", "zodiac.jpg", MediaKind::Movie),
    ("City of God", "city-of-god.jpg", MediaKind::Movie),
    ("Love Death Robots", "love-death-robots.jpg", MediaKind::Tv),
    ("The Godfather", "the-godfather.jpg", MediaKind::Movie),
    ("Sin City", "sin-city.jpg", MediaKind::Movie),
    (
        "The Darjeeling Limited",
        "the-darjeeling-limited.jpg",
        MediaKind::Movie,
    ),
    ("Oldboy", "oldboy.jpg", MediaKind::Movie),
    ("BoJack Horseman", "bojack-horseman.jpg", MediaKind::Tv),
    ("Gravity Falls", "gravity-falls.jpg", MediaKind::Tv),
];

// Known stable TMDB poster paths, looked up manually
const KNOWN_POSTER_PATHS: &[(&str, &str)] = &[
    // TV Series
    ("the-sopranos.jpg", "/57okJJUBK0AaijxLh3RjNUaMvFI.jpg"),
    ("the-wire.jpg", "/4lbclFySvugI51fwsyxBTOm4DqK.jpg"),
    ("the-killing.jpg", "/q1dLFocxkkcGbrJz3VNgr5KhCDT.jpg"),
    ("boardwalk-empire.jpg", "/ufNmL6Yjv5q7PyGn4bHiwh9eoM1.jpg"),
    ("sherlock.jpg", "/7WTsnHkbA0FaG6R9twfFde0I9hl.jpg"),
    ("band-of-brothers.jpg", "/zReEqSIxMjGAFcfEDi4lanQOV6R.jpg"),
    ("game-of-thrones.jpg", "/1XS1oqL89opfnbLl8WnZY1O1uJx.jpg"),
    ("the-office.jpg", "/qWnJzyZhyy74gjpSjIXWmuk0ifX.jpg"),
    ("succession.jpg", "/7HW47XbkNQ5fiwQFYGWdw9gs144.jpg"),
    // Anime
    ("attack-on-titan.jpg", "/hTP1DtLGFamjfu8WqjnuQdP1n4i.jpg"),
    // Movies
    ("watchmen.jpg", "/zcKhFvSWvf0GIBcwqxHkMjLPqhE.jpg"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_passes_validation() {
        let catalog = Catalog::reference();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 65);
    }

    #[test]
    fn empty_catalogs_are_rejected() {
        let catalog = Catalog::new(Vec::new());
        assert_eq!(catalog.validate(), Err(CatalogError::Empty));
    }

    #[test]
    fn malformed_ids_are_rejected_with_their_position() {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("Fine", "tt0000001", "8.0"),
            CatalogEntry::new("Broken", "nm0000002", "8.0"),
        ]);

        match catalog.validate() {
            Err(CatalogError::MalformedEntry { index, title, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(title, "Broken");
            }
            other => panic!("expected malformed entry, got {other:?}"),
        }
    }

    #[test]
    fn blank_titles_and_ratings_are_rejected() {
        let blank_title = Catalog::new(vec![CatalogEntry::new("  ", "tt0000001", "8.0")]);
        assert!(matches!(
            blank_title.validate(),
            Err(CatalogError::MalformedEntry { index: 0, .. })
        ));

        let blank_rating = Catalog::new(vec![CatalogEntry::new("Fine", "tt0000001", "")]);
        assert!(matches!(
            blank_rating.validate(),
            Err(CatalogError::MalformedEntry { index: 0, .. })
        ));
    }

    #[test]
    fn entry_urls_point_at_the_title_page() {
        let entry = CatalogEntry::new("Band of Brothers", "tt0185906", "9.4");
        assert_eq!(entry.page_url(), "https://www.imdb.com/title/tt0185906/");
    }

    #[test]
    fn poster_specs_cover_searches_and_known_paths() {
        let specs = poster_specs();
        assert_eq!(specs.len(), 23);

        let searches = specs
            .iter()
            .filter(|s| matches!(s.source, PosterSource::Search { .. }))
            .count();
        assert_eq!(searches, 12);

        let first = &specs[0];
        assert_eq!(first.filename, "the-irishman.jpg");
        assert!(matches!(
            &first.source,
            PosterSource::Search { kind: MediaKind::Movie, .. }
        ));

        let last = specs.last().expect("non-empty");
        assert_eq!(last.filename, "watchmen.jpg");
        assert_eq!(
            last.source,
            PosterSource::KnownPath("/zcKhFvSWvf0GIBcwqxHkMjLPqhE.jpg".to_string())
        );
    }

    #[test]
    fn media_kinds_map_to_search_segments() {
        assert_eq!(MediaKind::Tv.search_segment(), "tv");
        assert_eq!(MediaKind::Movie.search_segment(), "movie");
    }
}
