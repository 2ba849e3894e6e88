//! Story Events
//!
//! Event-based communication for UI synchronization during a story session.
//! Events are queued at key points and drained by the host after each input:
//! - Bundle and item changes
//! - Seen-state changes
//! - Playback state notifications (with the measured duration)
//! - Loading indicator visibility
//! - Interruption changes
//! - Session dismissal

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use story_core::BundleId;

/// Events emitted by a story session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryEvent {
    /// Active bundle switched
    BundleChanged {
        /// Bundle that was on screen
        from: BundleId,
        /// Bundle now on screen
        to: BundleId,
    },

    /// Displayed item changed within the active bundle
    ItemChanged {
        /// Active bundle
        bundle: BundleId,
        /// New item index
        index: usize,
    },

    /// Bundle was marked seen (first running tick)
    BundleSeen {
        /// Bundle that was marked
        bundle: BundleId,
    },

    /// Current video was rewound instead of navigating back
    ItemRestarted {
        /// Active bundle
        bundle: BundleId,
    },

    /// Playback controller transitioned
    PlaybackStateChanged {
        /// New controller state
        state: PlaybackState,
        /// Measured duration in seconds
        duration_secs: f64,
    },

    /// Loading indicator should be shown or hidden
    LoadingIndicator {
        /// Whether the indicator is visible
        visible: bool,
    },

    /// Media could not be loaded; the item stays not ready
    LoadFailed {
        /// Locator that failed
        locator: String,
        /// Error message
        message: String,
    },

    /// Combined interruption state changed
    InterruptionChanged {
        /// Whether ticking and taps are suspended
        paused: bool,
    },

    /// Last item of the last bundle finished; the viewer closes
    SessionDismissed,
}

/// Events emitted by a playback controller
///
/// Consumed by the session, which maps them onto `StoryEvent`s and item
/// readiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Controller transitioned
    StateChanged {
        /// Locator the transition belongs to
        locator: String,
        /// New state
        state: PlaybackState,
        /// Measured duration in seconds
        duration_secs: f64,
    },

    /// Loading indicator visibility changed
    LoadingIndicator {
        /// Whether the indicator is visible
        visible: bool,
    },

    /// Media for `locator` was attached to the player
    Loaded {
        /// Locator that was attached
        locator: String,
        /// Measured duration in seconds
        duration_secs: f64,
    },

    /// Loader reported a failure
    LoadFailed {
        /// Locator that failed
        locator: String,
        /// Error message
        message: String,
    },
}
