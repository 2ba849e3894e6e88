//! Story Player - Playback Orchestration
//!
//! Platform-agnostic playback core for an ephemeral story viewer.
//!
//! This crate provides:
//! - Story progress engine (fixed tick, per-item durations, readiness gating)
//! - Bundle navigation (previous/next bundle, dismissal after the last story)
//! - Interruption coordination (keyboard, reaction overlay)
//! - Playback controller (load, play, stop, restart, stale-result guarding)
//! - Event queue and state snapshot for any rendering layer
//!
//! # Architecture
//!
//! `story-playback` is completely platform-agnostic:
//! - No dependency on a UI toolkit
//! - No dependency on a networking stack (media arrives through `MediaLoader`)
//! - Single-threaded: every input is delivered on the interaction thread
//!
//! Platform-specific code (the video player, media loading) is provided via
//! traits.
//!
//! # Example: Image Stories
//!
//! ```rust
//! use story_core::{BundleId, LoadTicket, MediaLoader, StoryBundle, StoryItem, StoryUser};
//! use story_playback::{MediaPlayer, StoryConfig, StorySession, TimeControlStatus};
//! # use story_core::LocalResource;
//!
//! struct NoVideo;
//! impl MediaPlayer for NoVideo {
//!     fn replace_item(&mut self, _: Option<&LocalResource>) {}
//!     fn current_locator(&self) -> Option<&str> { None }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek_to_start(&mut self) {}
//!     fn time_control_status(&self) -> TimeControlStatus { TimeControlStatus::Paused }
//!     fn current_duration(&self) -> Option<f64> { None }
//! }
//!
//! struct NoLoader;
//! impl MediaLoader for NoLoader {
//!     fn fetch(&mut self, _: LoadTicket) {}
//! }
//!
//! let bundle = StoryBundle::new(
//!     BundleId::new("alice"),
//!     StoryUser::new("alice", "Alice"),
//!     vec![
//!         StoryItem::image("https://cdn.example.com/1.jpg", 3.0),
//!         StoryItem::image("https://cdn.example.com/2.jpg", 3.0),
//!     ],
//! );
//!
//! let mut session = StorySession::new(StoryConfig::default(), vec![bundle], NoVideo, NoLoader)
//!     .expect("one bundle");
//! session.start();
//!
//! // 3 seconds at 100ms per tick
//! for _ in 0..30 {
//!     session.tick();
//! }
//! assert_eq!(session.current_index(), Some(1));
//! assert!(session.active_bundle().seen);
//! ```

mod collection;
mod controller;
pub mod events;
mod interruption;
mod navigator;
mod player;
mod progress;
mod session;
pub mod types;

// Public exports
pub use collection::BundleCollection;
pub use controller::PlaybackController;
pub use events::{ControllerEvent, StoryEvent};
pub use interruption::InterruptionCoordinator;
pub use navigator::{BundleNavigator, Navigation};
pub use player::MediaPlayer;
pub use progress::{tick_increment, Advance, Progress};
pub use session::{SessionSnapshot, StorySession};
pub use types::{PlaybackState, StoryConfig, TimeControlStatus, DURATION_SCALE, PROGRESS_STEP};
