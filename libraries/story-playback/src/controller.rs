//! Playback controller
//!
//! Owns the single media player of a story view and drives it through
//! load, play, stop and restart. Load results arrive asynchronously; each
//! request carries a generation so a completion for a superseded or torn
//! down request is recognised and dropped.

use crate::{
    events::ControllerEvent,
    player::MediaPlayer,
    types::{PlaybackState, TimeControlStatus},
};
use story_core::{LoadTicket, LocalResource, MediaLoader, StoryError};
use tracing::{debug, warn};

/// Controller for the player of the item on screen
pub struct PlaybackController<P: MediaPlayer> {
    player: P,
    state: PlaybackState,

    // Locator the controller is targeting (requested or attached)
    locator: Option<String>,
    generation: u64,
    in_flight: Option<LoadTicket>,

    // Measured duration of the attached item in seconds
    duration: f64,

    // Play as soon as a load completes
    autoplay: bool,

    // Status observation is active between a successful load and the next reset
    observing: bool,
    last_status: TimeControlStatus,

    loading_visible: bool,
    pending_events: Vec<ControllerEvent>,
}

impl<P: MediaPlayer> PlaybackController<P> {
    /// Wrap a player
    pub fn new(player: P) -> Self {
        Self {
            player,
            state: PlaybackState::NotStarted,
            locator: None,
            generation: 0,
            in_flight: None,
            duration: 0.0,
            autoplay: true,
            observing: false,
            last_status: TimeControlStatus::Paused,
            loading_visible: false,
            pending_events: Vec::new(),
        }
    }

    /// Whether loaded items start playing on their own (default: true)
    ///
    /// When off, a completed load attaches the item and reports it loaded,
    /// but playback waits for `resume_playback`.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Load and play `locator`
    ///
    /// No-op if `locator` is already the target. Otherwise the current item
    /// is stopped and one load request is issued; any earlier request becomes
    /// stale. Returns whether a request was issued.
    pub fn start<L: MediaLoader + ?Sized>(&mut self, locator: &str, loader: &mut L) -> bool {
        if self.locator.as_deref() == Some(locator) {
            debug!(locator, "Already targeting locator, ignoring start");
            return false;
        }

        self.stop();
        self.observing = false;
        self.locator = Some(locator.to_string());
        self.generation += 1;
        self.show_loading();

        let ticket = LoadTicket::new(self.generation, locator);
        debug!(locator, generation = self.generation, "Requesting media");
        self.in_flight = Some(ticket.clone());
        loader.fetch(ticket);
        true
    }

    /// Apply the outcome of a load request
    ///
    /// Returns false if the ticket is stale and nothing was applied.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<LocalResource, StoryError>,
    ) -> bool {
        if self.in_flight.as_ref() != Some(ticket) {
            debug!(
                locator = %ticket.locator,
                generation = ticket.generation,
                current = self.generation,
                "Dropping stale load completion"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(resource) => self.attach(resource),
            Err(err) => {
                warn!(locator = %ticket.locator, error = %err, "Failed to load media");
                // Forget the target so the caller can retry with the same locator
                self.locator = None;
                self.pending_events.push(ControllerEvent::LoadFailed {
                    locator: ticket.locator.clone(),
                    message: err.to_string(),
                });
            }
        }
        true
    }

    fn attach(&mut self, resource: LocalResource) {
        self.player.replace_item(None);
        self.player.replace_item(Some(&resource));
        self.player.set_waits_to_minimize_stalling(false);
        self.duration = self
            .player
            .current_duration()
            .or(resource.duration_secs)
            .unwrap_or(0.0);

        let playing = self.player.time_control_status() == TimeControlStatus::Playing;
        if self.autoplay && !playing {
            self.player.play();
            self.state = PlaybackState::Started;
        }
        self.observing = true;
        self.last_status = self.player.time_control_status();
        if self.last_status == TimeControlStatus::Playing || !self.autoplay {
            self.hide_loading();
        }

        debug!(
            locator = %resource.locator,
            duration = self.duration,
            autoplay = self.autoplay,
            "Media attached"
        );
        self.pending_events.push(ControllerEvent::Loaded {
            locator: resource.locator,
            duration_secs: self.duration,
        });
        if self.autoplay {
            self.notify(self.state);
        }
    }

    /// Report a player status transition
    ///
    /// Waiting shows the loading indicator; entering playing hides it and
    /// notifies the state once per transition.
    pub fn observe_time_control(&mut self, status: TimeControlStatus) {
        if !self.observing {
            return;
        }
        let previous = std::mem::replace(&mut self.last_status, status);
        match status {
            TimeControlStatus::Playing if previous != TimeControlStatus::Playing => {
                self.hide_loading();
                self.notify(self.state);
            }
            TimeControlStatus::WaitingToPlay => self.show_loading(),
            _ => {}
        }
    }

    /// Pause and rewind if playing
    pub fn stop(&mut self) -> bool {
        if self.player.time_control_status() != TimeControlStatus::Playing {
            return false;
        }
        self.player.pause();
        self.player.seek_to_start();
        self.sync_status();
        self.transition(PlaybackState::Stopped);
        true
    }

    /// Rewind and play again; only valid while paused
    pub fn restart(&mut self) -> bool {
        if self.player.time_control_status() != TimeControlStatus::Paused
            || self.player.current_locator().is_none()
        {
            return false;
        }
        self.rewind()
    }

    /// Rewind and play regardless of the current status
    ///
    /// Returns false while nothing is attached (load still pending).
    pub fn rewind(&mut self) -> bool {
        if self.player.current_locator().is_none() {
            debug!(locator = ?self.locator, "Nothing attached, ignoring rewind");
            return false;
        }
        self.player.seek_to_start();
        self.player.play();
        self.sync_status();
        self.transition(PlaybackState::Restart);
        true
    }

    /// Pause without rewinding (interruption)
    pub fn pause_playback(&mut self) {
        if self.player.time_control_status() != TimeControlStatus::Paused {
            self.player.pause();
            self.sync_status();
        }
    }

    /// Resume after an interruption
    ///
    /// Only plays if the attached item belongs to `locator`.
    pub fn resume_playback(&mut self, locator: &str) -> bool {
        if self.player.current_locator() != Some(locator) {
            return false;
        }
        self.player.set_waits_to_minimize_stalling(false);
        self.player.play();
        self.sync_status();
        if self.state == PlaybackState::NotStarted {
            self.transition(PlaybackState::Started);
        }
        true
    }

    /// Detach the current item without loading a new one
    ///
    /// Any request still in flight becomes stale.
    pub fn replace_current_item(&mut self) {
        self.player.replace_item(None);
        self.locator = None;
        self.in_flight = None;
        self.generation += 1;
        self.observing = false;
        self.sync_status();
    }

    /// Return to the initial state for a new item
    pub fn reset(&mut self) {
        if self.player.time_control_status() != TimeControlStatus::Paused {
            self.player.pause();
        }
        self.replace_current_item();
        self.duration = 0.0;
        self.state = PlaybackState::NotStarted;
        self.hide_loading();
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Locator the controller is targeting
    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    /// Measured duration of the attached item
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether a load request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the loading indicator is shown
    pub fn is_loading_indicator_visible(&self) -> bool {
        self.loading_visible
    }

    /// The wrapped player
    pub fn player(&self) -> &P {
        &self.player
    }

    /// The wrapped player, mutably
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn transition(&mut self, state: PlaybackState) {
        self.state = state;
        self.notify(state);
    }

    fn notify(&mut self, state: PlaybackState) {
        let Some(locator) = self
            .locator
            .clone()
            .or_else(|| self.player.current_locator().map(str::to_string))
        else {
            return;
        };
        self.pending_events.push(ControllerEvent::StateChanged {
            locator,
            state,
            duration_secs: self.duration,
        });
    }

    fn sync_status(&mut self) {
        self.last_status = self.player.time_control_status();
    }

    fn show_loading(&mut self) {
        if !self.loading_visible {
            self.loading_visible = true;
            self.pending_events
                .push(ControllerEvent::LoadingIndicator { visible: true });
        }
    }

    fn hide_loading(&mut self) {
        if self.loading_visible {
            self.loading_visible = false;
            self.pending_events
                .push(ControllerEvent::LoadingIndicator { visible: false });
        }
    }
}
