//! Story feed loading

use crate::error::Result;
use std::path::Path;
use story_core::{BundleId, StoryBundle, StoryError, StoryItem, StoryType, StoryUser};
use tracing::info;

/// Read bundles from a JSON feed file
pub fn load_bundles(path: &Path) -> Result<Vec<StoryBundle>> {
    let text = std::fs::read_to_string(path)?;
    let bundles = parse_bundles(&text)?;
    info!(path = %path.display(), bundles = bundles.len(), "Feed loaded");
    Ok(bundles)
}

/// Parse bundles from feed JSON
pub fn parse_bundles(json: &str) -> Result<Vec<StoryBundle>> {
    let bundles: Vec<StoryBundle> = serde_json::from_str(json).map_err(StoryError::from)?;
    if bundles.is_empty() {
        return Err(StoryError::EmptyCollection.into());
    }
    Ok(bundles)
}

/// Built-in feed used when no file is given
pub fn sample_bundles() -> Vec<StoryBundle> {
    let cdn = "https://cdn.example.com/stories";
    vec![
        StoryBundle::new(
            BundleId::new("ada"),
            StoryUser::new("ada", "Ada"),
            vec![
                StoryItem::image(format!("{cdn}/ada-1.jpg"), 3.0),
                StoryItem::image(format!("{cdn}/ada-2.jpg"), 2.0).with_story_type(
                    StoryType::Message {
                        placeholder: "Reply to Ada".to_string(),
                        emojis: Some(vec!["🔥".to_string(), "👏".to_string()]),
                        allows_reply: true,
                    },
                ),
            ],
        ),
        StoryBundle::new(
            BundleId::new("grace"),
            StoryUser::new("grace", "Grace"),
            vec![
                StoryItem::video(format!("{cdn}/grace-1.mp4")),
                StoryItem::image(format!("{cdn}/grace-2.jpg"), 4.0),
            ],
        ),
    ]
}
