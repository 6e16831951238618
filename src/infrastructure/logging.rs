//! Logging setup for the verifier binaries
//!
//! Console output goes to stderr so the report on stdout stays clean enough
//! to pipe. An optional file layer (plain or JSON) writes under `logs/`
//! next to the executable, with old files cleaned up by count.

use anyhow::{Result, anyhow};
use chrono::Utc;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

// Re-export LoggingConfig from config module
pub use crate::infrastructure::config::LoggingConfig;

// Global guards keep the non-blocking file writers alive for the process
// lifetime; `shutdown_logging` drops them to flush buffered lines.
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// UTC timestamp formatter shared by all layers
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Resolve the log directory: configured override, else `logs/` next to
/// the executable
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        return PathBuf::from(dir);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize logging with default configuration
pub fn init_logging() -> Result<()> {
    let config = LoggingConfig::default();
    init_logging_with_config(&config)
}

/// Initialize logging with custom configuration
///
/// Dependency noise (HTTP internals, HTML parsing) is suppressed below the
/// configured level unless the level is `trace`. `RUST_LOG` overrides
/// everything when set.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&config.level);

        if !config.level.to_lowercase().contains("trace") {
            filter = filter
                // HTTP client internals - only show on TRACE
                .add_directive("reqwest=info".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("h2=warn".parse().unwrap())
                // HTML parsing internals - only show on TRACE
                .add_directive("html5ever=warn".parse().unwrap())
                .add_directive("selectors=warn".parse().unwrap())
                // Keep our own logs at the requested level
                .add_directive(
                    format!("watchlist_verifier_lib={}", config.level)
                        .parse()
                        .unwrap(),
                );
        }

        filter
    });

    let registry = Registry::default().with(env_filter);

    match (config.file_output, config.console_output) {
        (true, true) => {
            let (file_writer, log_dir) = build_file_writer(config)?;

            if config.json_format {
                let file_layer = fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(true)
                    .with_ansi(false);
                let console_layer = fmt::Layer::new()
                    .with_writer(std::io::stderr)
                    .with_timer(UtcTimeFormatter)
                    .with_target(false);
                registry.with(file_layer).with(console_layer).init();
            } else {
                let file_layer = fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(false)
                    .with_ansi(false);
                let console_layer = fmt::Layer::new()
                    .with_writer(std::io::stderr)
                    .with_timer(UtcTimeFormatter)
                    .with_target(false);
                registry.with(file_layer).with(console_layer).init();
            }

            info!("Logging to console and {:?}", log_dir);
        }
        (true, false) => {
            let (file_writer, log_dir) = build_file_writer(config)?;

            if config.json_format {
                let file_layer = fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(true)
                    .with_ansi(false);
                registry.with(file_layer).init();
            } else {
                let file_layer = fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(false)
                    .with_ansi(false);
                registry.with(file_layer).init();
            }

            info!("Logging to {:?}", log_dir);
        }
        (false, true) => {
            let console_layer = fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_timer(UtcTimeFormatter)
                .with_target(false);

            registry.with(console_layer).init();
        }
        (false, false) => {
            return Err(anyhow!("No logging output configured"));
        }
    }

    Ok(())
}

/// Drop the file writer guards so buffered log lines land on disk
///
/// Call this before `std::process::exit`, which skips destructors.
pub fn shutdown_logging() {
    if let Ok(mut guards) = LOG_GUARDS.lock() {
        guards.clear();
    }
}

/// Create the log directory, clean up old files, and build the
/// non-blocking writer for today's log file
fn build_file_writer(
    config: &LoggingConfig,
) -> Result<(non_blocking::NonBlocking, PathBuf)> {
    let log_dir = get_log_directory(config);

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

    cleanup_old_logs(&log_dir, config.max_files)?;

    let file_name = format!("watchlist-{}.log", Utc::now().format("%Y%m%d"));
    let file_appender = rolling::never(&log_dir, file_name);
    let (file_writer, file_guard) = non_blocking(file_appender);

    if let Ok(mut guards) = LOG_GUARDS.lock() {
        guards.push(file_guard);
    }

    Ok((file_writer, log_dir))
}

/// Remove the oldest log files beyond the configured count
fn cleanup_old_logs(log_dir: &PathBuf, max_files: u32) -> Result<()> {
    if !log_dir.exists() || max_files == 0 {
        return Ok(());
    }

    let mut log_files = Vec::new();

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".log"))
        {
            if let Ok(metadata) = entry.metadata() {
                if let Ok(modified) = metadata.modified() {
                    log_files.push((path, modified));
                }
            }
        }
    }

    if log_files.len() <= max_files as usize {
        return Ok(());
    }

    // Newest first, then drop everything past the keep count
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in log_files.iter().skip(max_files as usize) {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove old log file {:?}: {}", path, e);
        }
    }

    Ok(())
}
