//! Story Demo - headless driver for the story viewer core
//!
//! Loads a feed, runs a `StorySession` against a simulated player and the
//! on-disk media cache, and reports what happened.

pub mod config;
pub mod driver;
pub mod error;
pub mod feed;
pub mod player;

pub use config::{DemoConfig, DemoSettings, InputAction, ScriptedInput};
pub use driver::{run, run_with_fetcher, DemoReport};
pub use error::{DemoError, Result};
pub use player::SimulatedPlayer;
