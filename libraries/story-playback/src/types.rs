//! Core types for story playback

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed amount a tick adds for a one-unit scaled duration
pub const PROGRESS_STEP: f64 = 0.01;

/// Converts a duration in seconds into progress-bar units
pub const DURATION_SCALE: f64 = 0.1;

/// Playback controller state
///
/// Reflects the controller's last transition and is surfaced together with
/// the measured duration whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded since the last reset
    #[default]
    NotStarted,

    /// Media loaded and playback begun
    Started,

    /// Paused and rewound
    Stopped,

    /// Rewound and playing again
    Restart,
}

/// Player-reported time control status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeControlStatus {
    /// Not playing
    #[default]
    Paused,

    /// Asked to play but buffering
    WaitingToPlay,

    /// Frames are being rendered
    Playing,
}

/// Configuration for a story session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Tick period in milliseconds (default: 100)
    pub tick_interval_ms: u64,

    /// Duration used for items without a usable one (default: 5.0)
    pub default_image_duration_secs: f64,

    /// Play video items as soon as they load (default: true)
    ///
    /// When off, videos still load and become ready on presentation; the
    /// host starts playback itself.
    pub autoplay: bool,
}

impl StoryConfig {
    /// Tick period as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            default_image_duration_secs: 5.0,
            autoplay: true,
        }
    }
}
