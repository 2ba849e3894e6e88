/// Story item domain type
use crate::types::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media shown by an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image, shown for its nominal duration
    Image,
    /// Video, shown for its measured duration
    Video,
}

/// Interaction variant of an item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoryType {
    /// Media only
    #[default]
    Plain,

    /// Media with a reply field and optional emoji reactions
    Message {
        /// Placeholder shown in the reply field
        placeholder: String,

        /// Reactions offered above the reply field
        #[serde(default)]
        emojis: Option<Vec<String>>,

        /// Whether replies are accepted
        #[serde(default = "default_allows_reply")]
        allows_reply: bool,
    },
}

fn default_allows_reply() -> bool {
    true
}

impl StoryType {
    /// Whether the item offers emoji reactions
    pub fn has_reactions(&self) -> bool {
        matches!(self, Self::Message { emojis: Some(e), .. } if !e.is_empty())
    }
}

/// A single image or video inside a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryItem {
    /// Unique item identifier
    pub id: ItemId,

    /// Image or video
    pub media: MediaKind,

    /// Remote media locator
    pub locator: String,

    /// Nominal display duration in seconds (placeholder for video)
    pub duration: f64,

    /// Interaction variant
    #[serde(default)]
    pub story_type: StoryType,

    /// When the item was posted
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,

    /// Set once the item's view started loading (image) or the player
    /// reported the video as playing
    #[serde(skip)]
    pub ready: bool,

    /// Duration reported by the player once the video asset is open
    #[serde(skip)]
    pub measured_duration: Option<f64>,
}

impl StoryItem {
    /// Create an image item with a nominal duration
    pub fn image(locator: impl Into<String>, duration: f64) -> Self {
        Self::new(MediaKind::Image, locator, duration)
    }

    /// Create a video item; its duration is measured by the player
    pub fn video(locator: impl Into<String>) -> Self {
        Self::new(MediaKind::Video, locator, 0.0)
    }

    fn new(media: MediaKind, locator: impl Into<String>, duration: f64) -> Self {
        Self {
            id: ItemId::generate(),
            media,
            locator: locator.into(),
            duration,
            story_type: StoryType::Plain,
            date: Utc::now(),
            ready: false,
            measured_duration: None,
        }
    }

    /// Replace the interaction variant
    #[must_use]
    pub fn with_story_type(mut self, story_type: StoryType) -> Self {
        self.story_type = story_type;
        self
    }

    /// Whether the item is a video
    pub fn is_video(&self) -> bool {
        self.media == MediaKind::Video
    }

    /// Duration that drives the progress bar
    ///
    /// Videos only have one once the player measured them; images always use
    /// their nominal duration.
    pub fn effective_duration(&self) -> Option<f64> {
        match self.media {
            MediaKind::Video => self.measured_duration,
            MediaKind::Image => Some(self.duration),
        }
    }

    /// Record the measured duration of a video and mark it ready
    pub fn record_measured_duration(&mut self, duration: f64) {
        self.measured_duration = Some(duration);
        self.duration = duration;
        self.ready = true;
    }
}
