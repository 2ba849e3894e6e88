//! Content-addressed on-disk media cache
//!
//! Remote media is stored under a name derived from its URL so the same
//! locator always maps to the same file. Writes go to a temporary file that
//! is renamed into place, so a reader never sees a partial download.

use crate::{
    config::CacheConfig,
    error::{CacheError, Result},
    fetcher::MediaFetcher,
};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use story_core::LocalResource;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// Longest file extension carried over into the cache file name
const MAX_EXTENSION_LEN: usize = 8;

/// Where the bytes behind a locator live
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Remote(Url),
    Local(PathBuf),
}

fn classify(locator: &str) -> Result<Source> {
    let invalid = || CacheError::InvalidLocator(locator.to_string());
    match Url::parse(locator) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(Source::Remote(url)),
            "file" => url.to_file_path().map(Source::Local).map_err(|()| invalid()),
            _ => Err(invalid()),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) if !locator.trim().is_empty() => {
            Ok(Source::Local(PathBuf::from(locator)))
        }
        Err(_) => Err(invalid()),
    }
}

/// Stable cache file name for a remote URL
fn cache_file_name(url: &Url) -> String {
    let key = Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_str().as_bytes());
    let extension = Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.len() <= MAX_EXTENSION_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    match extension {
        Some(ext) => format!("{key}.{}", ext.to_ascii_lowercase()),
        None => key.to_string(),
    }
}

/// On-disk cache in front of a `MediaFetcher`
///
/// Shared between loader tasks behind an `Arc`. The in-memory index only
/// remembers recent locator to path mappings; the directory is the source of
/// truth.
pub struct MediaCache<F: MediaFetcher> {
    dir: PathBuf,
    fetcher: F,
    index: Mutex<LruCache<String, PathBuf>>,
}

impl<F: MediaFetcher> MediaCache<F> {
    /// Create a cache in `config.cache_dir`
    ///
    /// The directory is created on first write.
    pub fn new(config: &CacheConfig, fetcher: F) -> Self {
        let capacity = NonZeroUsize::new(config.index_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            dir: config.cache_dir.clone(),
            fetcher,
            index: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Map a locator to a local, playable file
    ///
    /// Local paths and `file://` URLs resolve in place when the file exists.
    /// Remote URLs resolve from the index, then the cache directory, and
    /// only then are fetched and stored.
    pub async fn resolve(&self, locator: &str) -> Result<LocalResource> {
        match classify(locator)? {
            Source::Local(path) => {
                if tokio::fs::try_exists(&path).await? {
                    Ok(LocalResource::new(locator, path))
                } else {
                    Err(CacheError::NotFound(path))
                }
            }
            Source::Remote(url) => self.resolve_remote(locator, &url).await,
        }
    }

    /// Whether `locator` resolves without a fetch
    pub async fn contains(&self, locator: &str) -> bool {
        let path = match classify(locator) {
            Ok(Source::Local(path)) => path,
            Ok(Source::Remote(url)) => self.dir.join(cache_file_name(&url)),
            Err(_) => return false,
        };
        tokio::fs::try_exists(&path).await.unwrap_or(false)
    }

    /// Path a remote locator is (or would be) cached at
    ///
    /// `None` for local and invalid locators.
    pub fn cached_path(&self, locator: &str) -> Option<PathBuf> {
        match classify(locator) {
            Ok(Source::Remote(url)) => Some(self.dir.join(cache_file_name(&url))),
            _ => None,
        }
    }

    /// Remove every cached file and forget the index
    pub async fn clear(&self) -> Result<()> {
        self.lock_index().clear();

        if !tokio::fs::try_exists(&self.dir).await? {
            return Ok(());
        }

        let mut removed = 0usize;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        info!(dir = %self.dir.display(), removed, "Media cache cleared");
        Ok(())
    }

    /// Number of locators in the in-memory index
    pub fn indexed_len(&self) -> usize {
        self.lock_index().len()
    }

    async fn resolve_remote(&self, locator: &str, url: &Url) -> Result<LocalResource> {
        if let Some(path) = self.indexed(locator) {
            if tokio::fs::try_exists(&path).await? {
                debug!(locator, "Media cache hit");
                return Ok(LocalResource::new(locator, path));
            }
            // File removed behind our back
            self.lock_index().pop(locator);
        }

        let path = self.dir.join(cache_file_name(url));
        if tokio::fs::try_exists(&path).await? {
            debug!(locator, path = %path.display(), "Media found on disk");
            self.remember(locator, &path);
            return Ok(LocalResource::new(locator, path));
        }

        let body = self.fetcher.fetch(url.as_str()).await?;
        self.store(&path, &body).await?;
        info!(locator, path = %path.display(), size = body.len(), "Media cached");

        self.remember(locator, &path);
        Ok(LocalResource::new(locator, path))
    }

    async fn store(&self, path: &Path, body: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = self.dir.join(format!(".{}.part", Uuid::new_v4()));
        tokio::fs::write(&temp, body).await?;
        if let Err(err) = tokio::fs::rename(&temp, path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                warn!(path = %temp.display(), error = %cleanup, "Failed to remove partial download");
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn indexed(&self, locator: &str) -> Option<PathBuf> {
        self.lock_index().get(locator).cloned()
    }

    fn remember(&self, locator: &str, path: &Path) {
        self.lock_index().put(locator.to_string(), path.to_path_buf());
    }

    fn lock_index(&self) -> std::sync::MutexGuard<'_, LruCache<String, PathBuf>> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
