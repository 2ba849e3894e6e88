//! Story session - core orchestration
//!
//! Coordinates the bundle collection, progress, interruptions, bundle
//! navigation and the playback controller for one viewing session. All
//! inputs (ticks, taps, interruption signals, loader completions and player
//! status changes) are delivered on the interaction thread; the session
//! queues `StoryEvent`s for the host to drain after each input.

use crate::{
    collection::BundleCollection,
    controller::PlaybackController,
    events::{ControllerEvent, StoryEvent},
    interruption::InterruptionCoordinator,
    navigator::{BundleNavigator, Navigation},
    player::MediaPlayer,
    progress::{tick_increment, Advance, Progress},
    types::{PlaybackState, StoryConfig, TimeControlStatus},
};
use serde::{Deserialize, Serialize};
use story_core::{
    BundleId, LoadTicket, LocalResource, MediaKind, MediaLoader, Result, StoryBundle, StoryError,
    StoryItem,
};
use tracing::{debug, info, trace};

/// Plain view of the session for a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Bundle on screen
    pub active_bundle: BundleId,

    /// Displayed item index (`None` for an empty bundle)
    pub item_index: Option<usize>,

    /// Items in the active bundle
    pub item_count: usize,

    /// Raw progress value
    pub progress: f64,

    /// Fill fraction of each progress bar
    pub fills: Vec<f64>,

    /// Whether an interruption suspends ticking and taps
    pub paused: bool,

    /// Whether the viewer was dismissed
    pub dismissed: bool,

    /// Playback controller state
    pub playback_state: PlaybackState,

    /// Whether the loading indicator is shown
    pub loading: bool,
}

/// Central story playback management
///
/// Orchestrates:
/// - Progress advancement on a fixed tick
/// - Item readiness (images on presentation, videos once measured)
/// - Tap navigation within and across bundles
/// - Interruption gating of ticks and taps
/// - Playback controller lifecycle per item
/// - Session dismissal after the last story
pub struct StorySession<P: MediaPlayer, L: MediaLoader> {
    config: StoryConfig,
    bundles: BundleCollection,
    progress: Progress,
    interruption: InterruptionCoordinator,
    controller: PlaybackController<P>,
    loader: L,
    dismissed: bool,

    // Event queue for UI synchronization
    pending_events: Vec<StoryEvent>,
}

impl<P: MediaPlayer, L: MediaLoader> StorySession<P, L> {
    /// Create a session showing the first bundle
    pub fn new(config: StoryConfig, bundles: Vec<StoryBundle>, player: P, loader: L) -> Result<Self> {
        let bundles = BundleCollection::new(bundles)?;
        Ok(Self::from_collection(config, bundles, player, loader))
    }

    /// Create a session showing `active`
    pub fn with_active(
        config: StoryConfig,
        bundles: Vec<StoryBundle>,
        active: &BundleId,
        player: P,
        loader: L,
    ) -> Result<Self> {
        let bundles = BundleCollection::with_active(bundles, active)?;
        Ok(Self::from_collection(config, bundles, player, loader))
    }

    fn from_collection(
        config: StoryConfig,
        bundles: BundleCollection,
        player: P,
        loader: L,
    ) -> Self {
        let mut controller = PlaybackController::new(player);
        controller.set_autoplay(config.autoplay);
        Self {
            config,
            bundles,
            progress: Progress::new(),
            interruption: InterruptionCoordinator::new(),
            controller,
            loader,
            dismissed: false,
            pending_events: Vec::new(),
        }
    }

    /// Present the current item as the viewer appears
    pub fn start(&mut self) {
        info!(bundle = %self.bundles.active_id(), "Story session started");
        self.controller.stop();
        self.progress.reset();
        self.present_current_item();
        self.collect_controller_events();
    }

    // ===== Inputs =====

    /// Advance by one timer tick
    ///
    /// No-op while dismissed or interrupted. The first running tick marks the
    /// active bundle seen; progress only moves while the current item is
    /// ready.
    pub fn tick(&mut self) {
        if self.dismissed || self.interruption.is_paused() {
            return;
        }

        if self.bundles.mark_active_seen() {
            debug!(bundle = %self.bundles.active_id(), "Bundle marked seen");
            self.pending_events.push(StoryEvent::BundleSeen {
                bundle: self.bundles.active_id().clone(),
            });
        }

        let count = self.item_count();
        if self.progress.is_complete(count) {
            self.advance_bundle();
            return;
        }

        let Some(increment) = self
            .current_item()
            .and_then(|item| tick_increment(item, self.config.default_image_duration_secs))
        else {
            trace!(progress = self.progress.value(), "Current item not ready");
            return;
        };

        match self.progress.advance(increment, count) {
            Advance::Within => {}
            Advance::Item(index) => self.enter_item(index),
            Advance::End => self.advance_bundle(),
        }
    }

    /// Tap on the right half: next item, or next bundle on the last item
    ///
    /// Returns false when the tap was rejected.
    pub fn tap_right(&mut self) -> bool {
        if !self.accepts_taps() {
            return false;
        }
        let count = self.item_count();
        match self.current_index() {
            Some(index) if index + 1 < count => {
                self.progress.snap_to(index + 1);
                self.enter_item(index + 1);
            }
            _ => self.advance_bundle(),
        }
        true
    }

    /// Tap on the left half: previous item, or previous bundle on the first
    ///
    /// Returns false when the tap was rejected.
    pub fn tap_left(&mut self) -> bool {
        if !self.accepts_taps() {
            return false;
        }
        match self.current_index() {
            Some(index) if index > 0 => {
                self.progress.snap_to(index - 1);
                self.enter_item(index - 1);
            }
            current => self.retreat_bundle(current),
        }
        true
    }

    /// On-screen keyboard opened or closed
    pub fn set_keyboard_open(&mut self, open: bool) {
        if let Some(paused) = self.interruption.set_keyboard_open(open) {
            self.on_interruption_changed(paused);
        }
    }

    /// Reaction animation started or finished
    pub fn set_reaction_active(&mut self, active: bool) {
        if let Some(paused) = self.interruption.set_reaction_active(active) {
            self.on_interruption_changed(paused);
        }
    }

    /// Deliver a loader completion
    ///
    /// Stale completions (superseded request or item no longer on screen)
    /// are ignored. Returns whether the result was applied.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: std::result::Result<LocalResource, StoryError>,
    ) -> bool {
        let applied = self.controller.complete_load(ticket, result);
        if applied && self.interruption.is_paused() {
            self.controller.pause_playback();
        }
        self.collect_controller_events();
        applied
    }

    /// Deliver a player status transition
    pub fn observe_time_control(&mut self, status: TimeControlStatus) {
        self.controller.observe_time_control(status);
        self.collect_controller_events();
    }

    /// Show a specific bundle (e.g. picked from the story tray)
    pub fn jump_to_bundle(&mut self, id: &BundleId) -> Result<()> {
        if self.dismissed {
            return Ok(());
        }
        let navigation = BundleNavigator::new(&mut self.bundles).jump_to(id)?;
        self.apply_navigation(navigation);
        Ok(())
    }

    /// (Re)present the item on screen
    ///
    /// Images become ready immediately and release the player; videos are
    /// requested from the loader and become ready once the controller reports
    /// them loaded. With `autoplay` off a loaded video stays paused until the
    /// host calls `PlaybackController::resume_playback`.
    pub fn present_current_item(&mut self) {
        let Some(index) = self.current_index() else {
            return;
        };
        let Some(item) = self.bundles.active_item(index) else {
            return;
        };
        let media = item.media;
        let locator = item.locator.clone();

        match media {
            MediaKind::Image => {
                self.controller.reset();
                if let Some(item) = self.bundles.active_item_mut(index) {
                    item.ready = true;
                }
            }
            MediaKind::Video => {
                if self.controller.start(&locator, &mut self.loader) {
                    // Not playable again until this request completes
                    if let Some(item) = self.bundles.active_item_mut(index) {
                        item.ready = false;
                    }
                }
                if self.config.autoplay && !self.interruption.is_paused() {
                    self.controller.resume_playback(&locator);
                }
            }
        }
        self.collect_controller_events();
    }

    // ===== Queries =====

    /// Raw progress value
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    /// Displayed item index
    pub fn current_index(&self) -> Option<usize> {
        self.progress.current_index(self.item_count())
    }

    /// Displayed item
    pub fn current_item(&self) -> Option<&StoryItem> {
        self.current_index()
            .and_then(|index| self.bundles.active_item(index))
    }

    /// Bundle on screen
    pub fn active_bundle(&self) -> &StoryBundle {
        self.bundles.active()
    }

    /// Identifier of the bundle on screen
    pub fn active_bundle_id(&self) -> &BundleId {
        self.bundles.active_id()
    }

    /// All bundles with their in-place state
    pub fn bundles(&self) -> &BundleCollection {
        &self.bundles
    }

    /// Whether ticking is suspended by an interruption
    pub fn is_paused(&self) -> bool {
        self.interruption.is_paused()
    }

    /// Whether the viewer was dismissed
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Playback controller state
    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    /// The playback controller
    pub fn controller(&self) -> &PlaybackController<P> {
        &self.controller
    }

    /// The playback controller, mutably
    pub fn controller_mut(&mut self) -> &mut PlaybackController<P> {
        &mut self.controller
    }

    /// The media loader
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The media loader, mutably
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Session configuration
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Plain state for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        let item_count = self.item_count();
        SessionSnapshot {
            active_bundle: self.bundles.active_id().clone(),
            item_index: self.current_index(),
            item_count,
            progress: self.progress.value(),
            fills: self.progress.fills(item_count),
            paused: self.interruption.is_paused(),
            dismissed: self.dismissed,
            playback_state: self.controller.state(),
            loading: self.controller.is_loading_indicator_visible(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<StoryEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn item_count(&self) -> usize {
        self.bundles.active().len()
    }

    fn accepts_taps(&self) -> bool {
        if self.dismissed {
            return false;
        }
        if self.interruption.is_tap_disabled() {
            debug!("Tap ignored while interrupted");
            return false;
        }
        true
    }

    fn enter_item(&mut self, index: usize) {
        debug!(bundle = %self.bundles.active_id(), index, "Item changed");
        self.pending_events.push(StoryEvent::ItemChanged {
            bundle: self.bundles.active_id().clone(),
            index,
        });
        self.present_current_item();
    }

    fn advance_bundle(&mut self) {
        let current = self.current_index();
        let navigation = BundleNavigator::new(&mut self.bundles).next(current);
        self.apply_navigation(navigation);
    }

    fn retreat_bundle(&mut self, current: Option<usize>) {
        let navigation = BundleNavigator::new(&mut self.bundles).previous(current);
        self.apply_navigation(navigation);
    }

    fn apply_navigation(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::BundleChanged { from, to } => {
                self.controller.reset();
                self.progress.reset();
                self.pending_events
                    .push(StoryEvent::BundleChanged { from, to });
                self.present_current_item();
            }
            Navigation::RestartItem => {
                self.controller.rewind();
                self.progress.reset();
                self.pending_events.push(StoryEvent::ItemRestarted {
                    bundle: self.bundles.active_id().clone(),
                });
                self.collect_controller_events();
            }
            Navigation::Dismiss => {
                self.dismissed = true;
                self.controller.reset();
                self.collect_controller_events();
                self.pending_events.push(StoryEvent::SessionDismissed);
            }
            Navigation::Stay => {}
        }
    }

    fn on_interruption_changed(&mut self, paused: bool) {
        debug!(paused, "Interruption changed");
        if let Some(item) = self.current_item().filter(|item| item.is_video()) {
            let locator = item.locator.clone();
            if paused {
                self.controller.pause_playback();
            } else {
                self.controller.resume_playback(&locator);
            }
        }
        self.pending_events
            .push(StoryEvent::InterruptionChanged { paused });
    }

    /// Map controller events onto session events and item readiness
    fn collect_controller_events(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                ControllerEvent::StateChanged {
                    state,
                    duration_secs,
                    ..
                } => {
                    self.pending_events.push(StoryEvent::PlaybackStateChanged {
                        state,
                        duration_secs,
                    });
                }
                ControllerEvent::LoadingIndicator { visible } => {
                    self.pending_events
                        .push(StoryEvent::LoadingIndicator { visible });
                }
                ControllerEvent::Loaded {
                    locator,
                    duration_secs,
                } => self.record_video_duration(&locator, duration_secs),
                ControllerEvent::LoadFailed { locator, message } => {
                    self.pending_events
                        .push(StoryEvent::LoadFailed { locator, message });
                }
            }
        }
    }

    fn record_video_duration(&mut self, locator: &str, duration: f64) {
        if self.controller.player().current_locator() != Some(locator) {
            return;
        }
        let Some(index) = self.current_index() else {
            return;
        };
        let fallback = self.config.default_image_duration_secs;
        if let Some(item) = self
            .bundles
            .active_item_mut(index)
            .filter(|item| item.is_video() && item.locator == locator)
        {
            let duration = if duration.is_finite() && duration > 0.0 {
                duration
            } else {
                fallback
            };
            item.record_measured_duration(duration);
            debug!(locator, duration, "Video ready");
        }
    }
}
