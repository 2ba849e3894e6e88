/// Loader request and resolved resource types
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single load request issued by a playback controller
///
/// The generation is bumped by the controller on every new request and on
/// every reset, so a completion carrying an older generation is stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    /// Controller-local request generation
    pub generation: u64,

    /// Remote media locator that was requested
    pub locator: String,
}

impl LoadTicket {
    /// Create a new ticket
    pub fn new(generation: u64, locator: impl Into<String>) -> Self {
        Self {
            generation,
            locator: locator.into(),
        }
    }
}

/// A media resource available on the local device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalResource {
    /// Remote locator this resource was resolved from
    pub locator: String,

    /// Local file holding the media
    pub path: PathBuf,

    /// Duration probed by the loader, if it knows one
    pub duration_secs: Option<f64>,
}

impl LocalResource {
    /// Create a resource without a probed duration
    pub fn new(locator: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            locator: locator.into(),
            path: path.into(),
            duration_secs: None,
        }
    }

    /// Attach a probed duration
    #[must_use]
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Local file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
