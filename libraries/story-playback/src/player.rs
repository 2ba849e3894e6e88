//! Platform-agnostic media player trait
//!
//! Abstracts the video player widget for different platforms. Rendering and
//! layer management stay with the host; the controller only drives playback.

use crate::types::TimeControlStatus;
use story_core::LocalResource;

/// Platform-agnostic media player
///
/// Implementors wrap the platform's video player. The host reports status
/// changes to the owning controller through
/// `PlaybackController::observe_time_control` instead of the controller
/// watching fields on the player.
pub trait MediaPlayer {
    /// Replace the current item
    ///
    /// `None` detaches the item so the platform can stop decode work.
    fn replace_item(&mut self, resource: Option<&LocalResource>);

    /// Locator of the attached item, if any
    fn current_locator(&self) -> Option<&str>;

    /// Begin or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to the beginning of the attached item
    fn seek_to_start(&mut self);

    /// Current time control status
    fn time_control_status(&self) -> TimeControlStatus;

    /// Duration of the attached asset in seconds, if the platform knows it
    fn current_duration(&self) -> Option<f64>;

    /// Whether the player should delay playback to avoid stalling
    ///
    /// Stories favour starting immediately, so the controller turns this off.
    fn set_waits_to_minimize_stalling(&mut self, waits: bool) {
        let _ = waits;
    }
}

impl<P: MediaPlayer + ?Sized> MediaPlayer for Box<P> {
    fn replace_item(&mut self, resource: Option<&LocalResource>) {
        (**self).replace_item(resource);
    }

    fn current_locator(&self) -> Option<&str> {
        (**self).current_locator()
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek_to_start(&mut self) {
        (**self).seek_to_start();
    }

    fn time_control_status(&self) -> TimeControlStatus {
        (**self).time_control_status()
    }

    fn current_duration(&self) -> Option<f64> {
        (**self).current_duration()
    }

    fn set_waits_to_minimize_stalling(&mut self, waits: bool) {
        (**self).set_waits_to_minimize_stalling(waits);
    }
}

/// Dummy player for testing
///
/// Plays instantly and records the calls it received.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummyPlayer {
    pub item: Option<LocalResource>,
    pub status: TimeControlStatus,
    pub duration: Option<f64>,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: usize,
    pub waits_to_minimize_stalling: bool,
}

#[cfg(test)]
impl DummyPlayer {
    /// Create a player that reports `duration` for every asset
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            waits_to_minimize_stalling: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl MediaPlayer for DummyPlayer {
    fn replace_item(&mut self, resource: Option<&LocalResource>) {
        self.item = resource.cloned();
        if self.item.is_none() {
            self.status = TimeControlStatus::Paused;
        }
    }

    fn current_locator(&self) -> Option<&str> {
        self.item.as_ref().map(|r| r.locator.as_str())
    }

    fn play(&mut self) {
        self.plays += 1;
        if self.item.is_some() {
            self.status = TimeControlStatus::Playing;
        }
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.status = TimeControlStatus::Paused;
    }

    fn seek_to_start(&mut self) {
        self.seeks += 1;
    }

    fn time_control_status(&self) -> TimeControlStatus {
        self.status
    }

    fn current_duration(&self) -> Option<f64> {
        self.item.as_ref().and(self.duration)
    }

    fn set_waits_to_minimize_stalling(&mut self, waits: bool) {
        self.waits_to_minimize_stalling = waits;
    }
}
