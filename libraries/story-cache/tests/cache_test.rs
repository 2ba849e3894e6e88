//! Tests for the media cache and channel loader
//!
//! Remote fetches go to a local mock server; cache directories are
//! temporary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use story_cache::{CacheConfig, CacheError, ChannelLoader, HttpFetcher, MediaCache, MediaFetcher};
use story_core::{LoadTicket, MediaLoader, StoryError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

/// Fetcher returning fixed bytes and counting calls
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl MediaFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> story_cache::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"media-bytes".to_vec())
    }
}

fn http_cache(dir: &TempDir) -> MediaCache<HttpFetcher> {
    let config = CacheConfig::new(dir.path());
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    MediaCache::new(&config, fetcher)
}

fn counting_cache(dir: &TempDir) -> MediaCache<CountingFetcher> {
    MediaCache::new(&CacheConfig::new(dir.path()), CountingFetcher::default())
}

// =============================================================================
// HTTP fetch
// =============================================================================

mod http {
    use super::*;

    #[tokio::test]
    async fn test_remote_media_is_downloaded_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stories/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"video".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let cache = http_cache(&dir);
        let locator = format!("{}/stories/clip.mp4", server.uri());

        let first = cache.resolve(&locator).await.unwrap();
        assert_eq!(first.locator, locator);
        assert!(first.path.starts_with(dir.path()));
        assert_eq!(first.path.extension().unwrap(), "mp4");
        assert_eq!(std::fs::read(&first.path).unwrap(), b"video");

        let second = cache.resolve(&locator).await.unwrap();
        assert_eq!(second.path, first.path);
        // MockServer verifies `expect(1)` on drop
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let cache = http_cache(&dir);
        let locator = format!("{}/missing.mp4", server.uri());

        let err = cache.resolve(&locator).await.unwrap_err();
        assert!(matches!(err, CacheError::Status { status: 404, .. }));
        assert!(!cache.contains(&locator).await);
    }
}

// =============================================================================
// Cache behaviour
// =============================================================================

mod cache {
    use super::*;

    #[tokio::test]
    async fn test_disk_hit_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let locator = "https://cdn.example.com/a.jpg";

        let first = counting_cache(&dir);
        let resource = first.resolve(locator).await.unwrap();
        assert_eq!(first.fetcher().calls.load(Ordering::SeqCst), 1);

        let second = counting_cache(&dir);
        assert!(second.contains(locator).await);
        let again = second.resolve(locator).await.unwrap();
        assert_eq!(again.path, resource.path);
        assert_eq!(second.fetcher().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_removed_file_is_fetched_again() {
        let dir = TempDir::new().unwrap();
        let cache = counting_cache(&dir);
        let locator = "https://cdn.example.com/a.mp4";

        let resource = cache.resolve(locator).await.unwrap();
        std::fs::remove_file(&resource.path).unwrap();

        cache.resolve(locator).await.unwrap();
        assert_eq!(cache.fetcher().calls.load(Ordering::SeqCst), 2);
        assert!(resource.path.exists());
    }

    #[tokio::test]
    async fn test_local_path_resolves_in_place() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("local.mp4");
        std::fs::write(&file, b"local").unwrap();

        let cache = counting_cache(&dir);
        let locator = file.to_str().unwrap();
        let resource = cache.resolve(locator).await.unwrap();

        assert_eq!(resource.path, file);
        assert_eq!(cache.fetcher().calls.load(Ordering::SeqCst), 0);
        assert!(cache.cached_path(locator).is_none());
    }

    #[tokio::test]
    async fn test_missing_local_file_fails() {
        let dir = TempDir::new().unwrap();
        let cache = counting_cache(&dir);
        let missing = dir.path().join("nope.mp4");

        let err = cache.resolve(missing.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, CacheError::NotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn test_clear_removes_files_and_index() {
        let dir = TempDir::new().unwrap();
        let cache = counting_cache(&dir);
        cache.resolve("https://cdn.example.com/a.jpg").await.unwrap();
        cache.resolve("https://cdn.example.com/b.jpg").await.unwrap();
        assert_eq!(cache.indexed_len(), 2);

        cache.clear().await.unwrap();

        assert_eq!(cache.indexed_len(), 0);
        assert!(!cache.contains("https://cdn.example.com/a.jpg").await);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clear_without_directory_is_ok() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path().join("never-created"));
        let cache = MediaCache::new(&config, CountingFetcher::default());
        assert!(cache.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_index_is_bounded() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig {
            index_capacity: 2,
            ..CacheConfig::new(dir.path())
        };
        let cache = MediaCache::new(&config, CountingFetcher::default());

        for name in ["a", "b", "c"] {
            cache
                .resolve(&format!("https://cdn.example.com/{name}.jpg"))
                .await
                .unwrap();
        }
        assert_eq!(cache.indexed_len(), 2);
    }
}

// =============================================================================
// Channel loader
// =============================================================================

mod loader {
    use super::*;

    #[tokio::test]
    async fn test_completion_carries_ticket() {
        let dir = TempDir::new().unwrap();
        let cache = Arc::new(counting_cache(&dir));
        let (mut loader, mut completions) =
            ChannelLoader::new(Arc::clone(&cache), tokio::runtime::Handle::current());

        let ticket = LoadTicket::new(7, "https://cdn.example.com/clip.mp4");
        loader.fetch(ticket.clone());

        let done = completions.recv().await.unwrap();
        assert_eq!(done.ticket, ticket);
        let resource = done.result.unwrap();
        assert_eq!(resource.locator, ticket.locator);
        assert!(resource.path.exists());
    }

    #[tokio::test]
    async fn test_failure_becomes_load_error() {
        let dir = TempDir::new().unwrap();
        let cache = Arc::new(counting_cache(&dir));
        let (mut loader, mut completions) =
            ChannelLoader::new(cache, tokio::runtime::Handle::current());

        loader.fetch(LoadTicket::new(1, "ftp://example.com/a.mp4"));

        let done = completions.recv().await.unwrap();
        match done.result {
            Err(StoryError::Load { locator, .. }) => {
                assert_eq!(locator, "ftp://example.com/a.mp4");
            }
            other => panic!("Expected load error, got {other:?}"),
        }
    }
}
