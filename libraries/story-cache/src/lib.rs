//! Story Cache - media cache and loader for story playback
//!
//! Resolves media locators to local files:
//! - Remote `http(s)` media is fetched once and kept in a content-addressed
//!   cache directory
//! - Local paths and `file://` URLs resolve in place
//! - [`ChannelLoader`] runs resolutions on a tokio runtime and hands
//!   completions back to the interaction thread over a channel
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use story_cache::{CacheConfig, ChannelLoader, HttpFetcher, MediaCache};
//! use story_core::{LoadTicket, MediaLoader};
//!
//! # async fn run() -> story_cache::Result<()> {
//! let config = CacheConfig::new("/tmp/story-media");
//! let fetcher = HttpFetcher::new(config.request_timeout())?;
//! let cache = Arc::new(MediaCache::new(&config, fetcher));
//!
//! let (mut loader, mut completions) =
//!     ChannelLoader::new(cache, tokio::runtime::Handle::current());
//! loader.fetch(LoadTicket::new(1, "https://cdn.example.com/clip.mp4"));
//!
//! if let Some(done) = completions.recv().await {
//!     println!("{:?} -> {:?}", done.ticket, done.result);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod error;
mod fetcher;
mod loader;

pub use cache::MediaCache;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use fetcher::{HttpFetcher, MediaFetcher};
pub use loader::{ChannelLoader, LoadCompletion};
