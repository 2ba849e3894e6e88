//! Error types for the media cache.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a media locator
#[derive(Error, Debug)]
pub enum CacheError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Locator is neither a remote URL nor a local file
    #[error("Invalid media locator: {0}")]
    InvalidLocator(String),

    /// Local locator points at a missing file
    #[error("Media file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error while reading or writing the cache directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
