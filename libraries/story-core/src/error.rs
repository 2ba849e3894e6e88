/// Core error types for the story viewer
use crate::types::BundleId;
use thiserror::Error;

/// Result type alias using `StoryError`
pub type Result<T> = std::result::Result<T, StoryError>;

/// Core error type for the story viewer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryError {
    /// Media could not be resolved to a local resource
    #[error("Failed to load media {locator}: {message}")]
    Load { locator: String, message: String },

    /// Locator is not a usable media reference
    #[error("Invalid media locator: {0}")]
    InvalidLocator(String),

    /// Bundle is not part of the collection
    #[error("Bundle not found: {0}")]
    BundleNotFound(BundleId),

    /// The collection has no bundles to present
    #[error("No story bundles to present")]
    EmptyCollection,

    /// Bundle/item feed could not be parsed
    #[error("Feed error: {0}")]
    Feed(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl StoryError {
    /// Create a load error
    pub fn load(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Create an invalid locator error
    pub fn invalid_locator(locator: impl Into<String>) -> Self {
        Self::InvalidLocator(locator.into())
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Feed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_mentions_locator() {
        let err = StoryError::load("https://cdn.example.com/a.mp4", "timed out");
        assert_eq!(
            err.to_string(),
            "Failed to load media https://cdn.example.com/a.mp4: timed out"
        );
    }

    #[test]
    fn feed_error_from_json() {
        let err: StoryError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, StoryError::Feed(_)));
    }
}
