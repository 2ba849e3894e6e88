//! Demo driver
//!
//! Runs a story session on the current tokio runtime: a fixed-period
//! interval produces ticks, loader completions arrive over the
//! `ChannelLoader` channel, and scripted input is applied before the tick it
//! is scheduled for. Everything touching the session happens on this task.

use crate::{
    config::{DemoConfig, InputAction, ScriptedInput},
    error::Result,
    player::SimulatedPlayer,
};
use std::sync::Arc;
use story_cache::{ChannelLoader, HttpFetcher, LoadCompletion, MediaCache, MediaFetcher};
use story_core::{MediaLoader, StoryBundle};
use story_playback::{SessionSnapshot, StoryEvent, StorySession};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Outcome of a demo run
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Ticks delivered to the session
    pub ticks: u64,

    /// Every event the session emitted, in order
    pub events: Vec<StoryEvent>,

    /// Session state when the run ended
    pub snapshot: SessionSnapshot,
}

/// Run the demo with the HTTP-backed cache
pub async fn run(config: &DemoConfig, bundles: Vec<StoryBundle>) -> Result<DemoReport> {
    let fetcher = HttpFetcher::new(config.cache.request_timeout())?;
    run_with_fetcher(config, bundles, fetcher).await
}

/// Run the demo resolving media through `fetcher`
pub async fn run_with_fetcher<F: MediaFetcher + 'static>(
    config: &DemoConfig,
    bundles: Vec<StoryBundle>,
    fetcher: F,
) -> Result<DemoReport> {
    let cache = Arc::new(MediaCache::new(&config.cache, fetcher));
    let (loader, completions) = ChannelLoader::new(cache, tokio::runtime::Handle::current());
    let player = SimulatedPlayer::new(config.demo.video_duration_secs, config.demo.startup_ticks);
    let session = StorySession::new(config.story.clone(), bundles, player, loader)?;

    let mut driver = Driver::new(config, session);
    driver.run(completions).await;
    Ok(driver.into_report())
}

struct Driver<L: MediaLoader> {
    config: DemoConfig,
    session: StorySession<SimulatedPlayer, L>,
    script: Vec<ScriptedInput>,
    ticks: u64,
    events: Vec<StoryEvent>,
}

impl<L: MediaLoader> Driver<L> {
    fn new(config: &DemoConfig, session: StorySession<SimulatedPlayer, L>) -> Self {
        let mut script = config.demo.script.clone();
        script.sort_by_key(|input| input.at_tick);
        Self {
            config: config.clone(),
            session,
            script,
            ticks: 0,
            events: Vec::new(),
        }
    }

    async fn run(&mut self, mut completions: tokio::sync::mpsc::UnboundedReceiver<LoadCompletion>) {
        let mut interval = tokio::time::interval(self.config.story.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        interval.tick().await;

        self.session.start();
        self.collect_events();

        while !self.finished() {
            tokio::select! {
                _ = interval.tick() => self.on_tick(),
                Some(done) = completions.recv() => {
                    self.session.complete_load(&done.ticket, done.result);
                }
            }
            self.collect_events();
        }

        info!(
            ticks = self.ticks,
            dismissed = self.session.is_dismissed(),
            "Demo finished"
        );
    }

    fn finished(&self) -> bool {
        self.session.is_dismissed()
            || self
                .config
                .demo
                .max_ticks
                .is_some_and(|max| self.ticks >= max)
    }

    fn on_tick(&mut self) {
        self.ticks += 1;

        let due = self
            .script
            .iter()
            .take_while(|input| input.at_tick <= self.ticks)
            .count();
        let inputs: Vec<ScriptedInput> = self.script.drain(..due).collect();
        for input in inputs {
            self.apply(input.action);
        }

        if let Some(status) = self.session.controller_mut().player_mut().advance() {
            self.session.observe_time_control(status);
        }
        self.session.tick();
    }

    fn apply(&mut self, action: InputAction) {
        debug!(?action, tick = self.ticks, "Scripted input");
        match action {
            InputAction::TapLeft => {
                self.session.tap_left();
            }
            InputAction::TapRight => {
                self.session.tap_right();
            }
            InputAction::KeyboardOpen => self.session.set_keyboard_open(true),
            InputAction::KeyboardClosed => self.session.set_keyboard_open(false),
            InputAction::ReactionStart => self.session.set_reaction_active(true),
            InputAction::ReactionEnd => self.session.set_reaction_active(false),
        }
    }

    fn collect_events(&mut self) {
        let mut skip_failed = false;
        for event in self.session.drain_events() {
            match &event {
                StoryEvent::BundleChanged { from, to } => {
                    info!(%from, %to, "Bundle changed");
                }
                StoryEvent::ItemChanged { bundle, index } => {
                    info!(%bundle, index, "Item changed");
                }
                StoryEvent::LoadFailed { locator, message } => {
                    warn!(%locator, %message, "Media failed to load");
                    skip_failed = self.config.demo.skip_failed_items;
                }
                StoryEvent::SessionDismissed => info!("Viewer dismissed"),
                other => debug!(event = ?other, "Story event"),
            }
            self.events.push(event);
        }

        if skip_failed && self.session.tap_right() {
            // Skipping may itself emit events
            self.collect_events();
        }
    }

    fn into_report(self) -> DemoReport {
        DemoReport {
            ticks: self.ticks,
            events: self.events,
            snapshot: self.session.snapshot(),
        }
    }
}
