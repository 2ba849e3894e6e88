/// Demo configuration
use crate::error::{DemoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use story_cache::CacheConfig;
use story_playback::StoryConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub story: StoryConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoSettings {
    /// Stop after this many ticks even if the viewer is still open
    #[serde(default = "default_max_ticks")]
    pub max_ticks: Option<u64>,

    /// Duration the simulated player reports for every video
    #[serde(default = "default_video_duration_secs")]
    pub video_duration_secs: f64,

    /// Ticks the simulated player buffers before it starts playing
    #[serde(default = "default_startup_ticks")]
    pub startup_ticks: u32,

    /// Tap past items whose media failed to load
    #[serde(default = "default_skip_failed")]
    pub skip_failed_items: bool,

    /// Simulated viewer input
    #[serde(default)]
    pub script: Vec<ScriptedInput>,
}

/// One simulated viewer input, applied just before the given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScriptedInput {
    pub at_tick: u64,
    pub action: InputAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    TapLeft,
    TapRight,
    KeyboardOpen,
    KeyboardClosed,
    ReactionStart,
    ReactionEnd,
}

impl DemoConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `STORY_` and use `__` between
    /// sections, e.g. `STORY_STORY__TICK_INTERVAL_MS=50`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(DemoError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("STORY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| DemoError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| DemoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.story.tick_interval_ms == 0 {
            return Err(DemoError::Config(
                "story.tick_interval_ms must be positive".to_string(),
            ));
        }
        let image_secs = self.story.default_image_duration_secs;
        if image_secs.is_nan() || image_secs <= 0.0 {
            return Err(DemoError::Config(
                "story.default_image_duration_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            video_duration_secs: default_video_duration_secs(),
            startup_ticks: default_startup_ticks(),
            skip_failed_items: default_skip_failed(),
            script: Vec::new(),
        }
    }
}

// Default values
fn default_max_ticks() -> Option<u64> {
    Some(3000)
}

fn default_video_duration_secs() -> f64 {
    6.0
}

fn default_startup_ticks() -> u32 {
    2
}

fn default_skip_failed() -> bool {
    true
}
