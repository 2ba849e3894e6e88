//! Async loader feeding completions back over a channel

use crate::{cache::MediaCache, fetcher::MediaFetcher};
use std::sync::Arc;
use story_core::{LoadTicket, LocalResource, MediaLoader, StoryError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

/// Result of one load request, tagged with its ticket
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: std::result::Result<LocalResource, StoryError>,
}

/// `MediaLoader` that resolves through a `MediaCache` on a tokio runtime
///
/// Each `fetch` spawns a task; its completion is sent to the receiver
/// returned by [`ChannelLoader::new`], which the interaction thread drains
/// into `StorySession::complete_load`.
pub struct ChannelLoader<F: MediaFetcher + 'static> {
    cache: Arc<MediaCache<F>>,
    handle: Handle,
    completions: mpsc::UnboundedSender<LoadCompletion>,
}

impl<F: MediaFetcher + 'static> ChannelLoader<F> {
    /// Create a loader spawning onto `handle`
    pub fn new(
        cache: Arc<MediaCache<F>>,
        handle: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<LoadCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let loader = Self {
            cache,
            handle,
            completions,
        };
        (loader, receiver)
    }

    /// Shared cache
    pub fn cache(&self) -> &Arc<MediaCache<F>> {
        &self.cache
    }
}

impl<F: MediaFetcher + 'static> MediaLoader for ChannelLoader<F> {
    fn fetch(&mut self, ticket: LoadTicket) {
        let cache = Arc::clone(&self.cache);
        let completions = self.completions.clone();

        self.handle.spawn(async move {
            let result = cache
                .resolve(&ticket.locator)
                .await
                .map_err(|err| StoryError::load(ticket.locator.clone(), err.to_string()));

            if completions.send(LoadCompletion { ticket, result }).is_err() {
                debug!("Load completion dropped, receiver closed");
            }
        });
    }
}
