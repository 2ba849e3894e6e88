//! Cache configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where and how media is cached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding cached media files
    pub cache_dir: PathBuf,

    /// Number of locators kept in the in-memory index
    pub index_capacity: usize,

    /// Per-request timeout for remote fetches
    pub request_timeout_secs: u64,
}

impl CacheConfig {
    /// Config rooted at `cache_dir` with default limits
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("story-media"),
            index_capacity: 256,
            request_timeout_secs: 30,
        }
    }
}
