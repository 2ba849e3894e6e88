//! Error types for the demo driver

use story_cache::CacheError;
use story_core::StoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Story(#[from] StoryError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;
