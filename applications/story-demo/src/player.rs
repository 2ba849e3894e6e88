//! Simulated media player
//!
//! Stands in for a platform video player: it "plays" whatever resource it is
//! given, reports a fixed duration, and buffers for a configurable number of
//! ticks before playback actually starts.

use story_core::LocalResource;
use story_playback::{MediaPlayer, TimeControlStatus};
use tracing::trace;

#[derive(Debug)]
pub struct SimulatedPlayer {
    item: Option<LocalResource>,
    status: TimeControlStatus,
    duration_secs: f64,
    startup_ticks: u32,
    buffering_left: u32,
}

impl SimulatedPlayer {
    pub fn new(duration_secs: f64, startup_ticks: u32) -> Self {
        Self {
            item: None,
            status: TimeControlStatus::Paused,
            duration_secs,
            startup_ticks,
            buffering_left: 0,
        }
    }

    /// Let one tick of wall time pass
    ///
    /// Returns the new status when buffering finished during this tick.
    pub fn advance(&mut self) -> Option<TimeControlStatus> {
        if self.status != TimeControlStatus::WaitingToPlay {
            return None;
        }
        self.buffering_left = self.buffering_left.saturating_sub(1);
        if self.buffering_left > 0 {
            return None;
        }
        self.status = TimeControlStatus::Playing;
        trace!("Simulated player finished buffering");
        Some(self.status)
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn replace_item(&mut self, resource: Option<&LocalResource>) {
        self.item = resource.cloned();
        self.buffering_left = self.startup_ticks;
        if self.item.is_none() {
            self.status = TimeControlStatus::Paused;
        }
    }

    fn current_locator(&self) -> Option<&str> {
        self.item.as_ref().map(|item| item.locator.as_str())
    }

    fn play(&mut self) {
        if self.item.is_none() {
            return;
        }
        self.status = if self.buffering_left > 0 {
            TimeControlStatus::WaitingToPlay
        } else {
            TimeControlStatus::Playing
        };
    }

    fn pause(&mut self) {
        self.status = TimeControlStatus::Paused;
    }

    fn seek_to_start(&mut self) {}

    fn time_control_status(&self) -> TimeControlStatus {
        self.status
    }

    fn current_duration(&self) -> Option<f64> {
        self.item
            .as_ref()
            .map(|item| item.duration_secs.unwrap_or(self.duration_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> LocalResource {
        LocalResource::new("clip.mp4", "/cache/clip.mp4")
    }

    #[test]
    fn buffers_before_playing() {
        let mut player = SimulatedPlayer::new(6.0, 2);
        player.replace_item(Some(&resource()));
        player.play();
        assert_eq!(player.time_control_status(), TimeControlStatus::WaitingToPlay);

        assert_eq!(player.advance(), None);
        assert_eq!(player.advance(), Some(TimeControlStatus::Playing));
        assert_eq!(player.advance(), None);
    }

    #[test]
    fn plays_immediately_without_startup() {
        let mut player = SimulatedPlayer::new(6.0, 0);
        player.replace_item(Some(&resource()));
        player.play();
        assert_eq!(player.time_control_status(), TimeControlStatus::Playing);
    }

    #[test]
    fn probed_duration_wins() {
        let mut player = SimulatedPlayer::new(6.0, 0);
        assert_eq!(player.current_duration(), None);
        player.replace_item(Some(&resource().with_duration(12.5)));
        assert_eq!(player.current_duration(), Some(12.5));
    }

    #[test]
    fn play_without_item_stays_paused() {
        let mut player = SimulatedPlayer::new(6.0, 0);
        player.play();
        assert_eq!(player.time_control_status(), TimeControlStatus::Paused);
    }
}
