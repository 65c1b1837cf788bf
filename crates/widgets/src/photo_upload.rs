//! Photo upload limits
//!
//! Mirrors the options handed to the drop zone so the server checks uploads
//! against the same limits the browser enforces.

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

const MB: u64 = 1024 * 1024;

/// Drop zone options for album photo uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadConfig {
    /// Largest accepted file, in MB
    #[serde(default = "default_max_mb", rename = "maxFilesize")]
    pub max_filesize_mb: u64,
    /// Largest file a thumbnail is rendered for, in MB
    #[serde(default = "default_max_mb", rename = "maxThumbnailFilesize")]
    pub max_thumbnail_filesize_mb: u64,
    /// Comma separated MIME types, `type/*` wildcards or `.ext` suffixes
    #[serde(default = "default_accepted_files")]
    pub accepted_files: String,
}

fn default_max_mb() -> u64 {
    20
}

fn default_accepted_files() -> String {
    "image/*".to_string()
}

impl Default for PhotoUploadConfig {
    fn default() -> Self {
        Self {
            max_filesize_mb: default_max_mb(),
            max_thumbnail_filesize_mb: default_max_mb(),
            accepted_files: default_accepted_files(),
        }
    }
}

impl PhotoUploadConfig {
    /// Set the size limit
    pub fn with_max_filesize_mb(mut self, mb: u64) -> Self {
        self.max_filesize_mb = mb;
        self
    }

    /// Set the accepted types
    pub fn with_accepted_files(mut self, accepted: impl Into<String>) -> Self {
        self.accepted_files = accepted.into();
        self
    }

    fn accepts_type(&self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        let base = mime.split(';').next().unwrap_or_default().trim();

        self.accepted_files
            .split(',')
            .map(|entry| entry.trim().to_ascii_lowercase())
            .filter(|entry| !entry.is_empty() && !entry.starts_with('.'))
            .any(|entry| match entry.strip_suffix("/*") {
                Some(kind) => base.split('/').next() == Some(kind) && base.contains('/'),
                None => entry == base,
            })
    }

    /// Check a file against the type and size limits
    pub fn check(&self, mime: &str, size: u64) -> Result<()> {
        if !self.accepts_type(mime) {
            return Err(WidgetError::UnsupportedType(mime.to_string()));
        }
        if size > self.max_filesize_mb.saturating_mul(MB) {
            return Err(WidgetError::FileTooLarge { size, max_mb: self.max_filesize_mb });
        }
        Ok(())
    }

    /// Whether the upload takes the file
    pub fn accepts(&self, mime: &str, size: u64) -> bool {
        self.check(mime, size).is_ok()
    }

    /// Whether a thumbnail is rendered for a file of this size
    pub fn renders_thumbnail(&self, size: u64) -> bool {
        size <= self.max_thumbnail_filesize_mb.saturating_mul(MB)
    }
}
