//! Remote media fetching

use crate::error::{CacheError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Downloads the bytes behind a remote URL
///
/// Implementations must be shareable across tasks; the cache calls `fetch`
/// from whichever runtime worker resolves a locator.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetch the full body at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<F: MediaFetcher + ?Sized> MediaFetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url).await
    }
}

/// `MediaFetcher` over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Wrap an existing client
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "Fetching media");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!(url = %url, size = body.len(), "Media fetched");
        Ok(body.to_vec())
    }
}
