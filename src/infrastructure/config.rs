//! Application configuration and site constants
//!
//! Configuration is layered: compiled-in defaults, an optional user config
//! file under the OS config directory, an optional project-local file, and
//! `WATCHLIST_`-prefixed environment variables. Every struct deserializes
//! with defaults so partial files and env-only overrides both work.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub posters: PosterConfig,
    pub logging: LoggingConfig,
}

/// Timing and politeness settings shared by all page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Upper bound for a single page navigation
    pub navigation_timeout_secs: u64,

    /// Upper bound for resolving one element's text
    pub element_timeout_ms: u64,

    /// Pause between consecutive catalog entries
    pub request_delay_ms: u64,

    /// Politeness cap enforced by the rate limiter
    pub max_requests_per_second: u32,

    pub follow_redirects: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            navigation_timeout_secs: defaults::NAVIGATION_TIMEOUT_SECS,
            element_timeout_ms: defaults::ELEMENT_TIMEOUT_MS,
            request_delay_ms: defaults::REQUEST_DELAY_MS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
        }
    }
}

/// Poster download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Directory poster files are written to, relative to the working
    /// directory unless absolute
    pub dest_dir: String,

    /// Upper bound for one image download
    pub download_timeout_secs: u64,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            dest_dir: defaults::POSTER_DEST_DIR.to_string(),
            download_timeout_secs: defaults::DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

/// Logging output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for the env filter (`RUST_LOG` still wins)
    pub level: String,

    pub console_output: bool,
    pub file_output: bool,

    /// Emit the file layer as JSON lines instead of plain text
    pub json_format: bool,

    /// Log directory override; defaults to `logs/` next to the executable
    pub directory: Option<String>,

    /// How many old log files to keep around
    pub max_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            console_output: true,
            file_output: false,
            json_format: false,
            directory: None,
            max_files: defaults::MAX_LOG_FILES,
        }
    }
}

impl AppConfig {
    /// Load configuration from all layered sources
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(config_dir) = dirs::config_dir() {
            let user_file = config_dir.join("watchlist-verifier").join("config");
            builder = builder
                .add_source(config::File::with_name(&user_file.to_string_lossy()).required(false));
        }

        let settings = builder
            .add_source(config::File::with_name("config/watchlist").required(false))
            .add_source(
                config::Environment::with_prefix("WATCHLIST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check configuration invariants that would otherwise surface as
    /// confusing runtime failures
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "fetch.user_agent must not be empty".to_string(),
            });
        }

        if self.fetch.navigation_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                message: "fetch.navigation_timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.fetch.element_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                message: "fetch.element_timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.fetch.max_requests_per_second == 0 {
            return Err(ConfigError::Validation {
                message: "fetch.max_requests_per_second must be greater than 0".to_string(),
            });
        }

        if self.posters.dest_dir.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "posters.dest_dir must not be empty".to_string(),
            });
        }

        if self.posters.download_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                message: "posters.download_timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "logging.level must not be empty".to_string(),
            });
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(ConfigError::Validation {
                message: "at least one logging output must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

/// IMDb URLs
pub mod imdb {
    /// Base URL for IMDb
    pub const BASE_URL: &str = "https://www.imdb.com";

    /// Title page for a tt-prefixed IMDb id, trailing slash included
    pub fn title_url(imdb_id: &str) -> String {
        format!("{BASE_URL}/title/{imdb_id}/")
    }
}

/// TMDB URLs for poster discovery and download
pub mod tmdb {
    /// Base URL for the TMDB website
    pub const BASE_URL: &str = "https://www.themoviedb.org";

    /// Base URL for the TMDB image CDN
    pub const IMAGE_BASE: &str = "https://image.tmdb.org";

    /// Image path prefix for the poster size we keep
    pub const SIZE_SEGMENT: &str = "/t/p/w500/";

    /// Search page for a section ("tv" or "movie") and a free-text query
    pub fn search_url(section: &str, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{BASE_URL}/search/{section}?query={encoded}")
    }

    /// Full download URL for a stable poster path (leading slash expected)
    pub fn poster_url(poster_path: &str) -> String {
        let size = SIZE_SEGMENT.trim_end_matches('/');
        format!("{IMAGE_BASE}{size}{poster_path}")
    }
}

/// YouTube URLs
pub mod youtube {
    /// Base URL for watch pages
    pub const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

    /// Watch page for a video id
    pub fn watch_url(video_id: &str) -> String {
        format!("{WATCH_BASE}{video_id}")
    }

    /// High-quality default thumbnail for a video id
    pub fn thumbnail_url(video_id: &str) -> String {
        format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
    }
}

/// Default configuration values
pub mod defaults {
    /// Default user agent, a plain desktop browser string
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

    /// Default navigation timeout in seconds
    pub const NAVIGATION_TIMEOUT_SECS: u64 = 15;

    /// Default per-element text timeout in milliseconds
    pub const ELEMENT_TIMEOUT_MS: u64 = 3000;

    /// Default delay between catalog entries in milliseconds
    pub const REQUEST_DELAY_MS: u64 = 1000;

    /// Default request rate cap
    pub const MAX_REQUESTS_PER_SECOND: u32 = 2;

    /// Default image download timeout in seconds
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

    /// Default poster destination directory
    pub const POSTER_DEST_DIR: &str = "static/images/watching";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default number of log files kept by cleanup
    pub const MAX_LOG_FILES: u32 = 5;
}
