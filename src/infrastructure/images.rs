//! Poster image storage
//!
//! Downloads land on disk only after a signature check, and an existing
//! file is replaced only when the new payload is strictly larger. Running
//! the sync twice therefore never downgrades an image.

use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};
use std::path::PathBuf;
use tracing::debug;

/// Supported poster formats, detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

/// Detect the image format from the payload's leading bytes
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0xFF, 0xD8]) {
        Some(ImageKind::Jpeg)
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some(ImageKind::Png)
    } else {
        None
    }
}

/// Result of one conditional save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The payload was written over a `previous`-sized file (0 when new)
    Saved { bytes: u64, previous: u64 },
    /// The file on disk is at least as large, nothing was written
    SkippedSmaller { bytes: u64, existing: u64 },
}

/// Filesystem store for poster images
pub struct ImageStore {
    dest_dir: PathBuf,
}

impl ImageStore {
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
        }
    }

    /// Create the destination directory if it does not exist yet
    pub async fn ensure_dest_dir(&self) -> ScrapeResult<()> {
        tokio::fs::create_dir_all(&self.dest_dir)
            .await
            .map_err(|e| ScrapeError::io(&self.dest_dir.to_string_lossy(), &e.to_string()))
    }

    /// Full path a filename resolves to inside the store
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dest_dir.join(filename)
    }

    /// Write the payload only when it is a real image and strictly larger
    /// than whatever is already on disk
    pub async fn save_if_larger(&self, filename: &str, bytes: &[u8]) -> ScrapeResult<SaveOutcome> {
        if sniff_image(bytes).is_none() {
            return Err(ScrapeError::content_invalid(
                "payload is neither JPEG nor PNG",
            ));
        }

        let path = self.path_for(filename);
        let existing = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        let incoming = bytes.len() as u64;
        if incoming <= existing {
            debug!(
                "Keeping existing {} ({} bytes on disk, {} bytes fetched)",
                filename, existing, incoming
            );
            return Ok(SaveOutcome::SkippedSmaller {
                bytes: incoming,
                existing,
            });
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ScrapeError::io(&path.to_string_lossy(), &e.to_string()))?;
        Ok(SaveOutcome::Saved {
            bytes: incoming,
            previous: existing,
        })
    }
}
