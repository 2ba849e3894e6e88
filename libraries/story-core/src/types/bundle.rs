/// Story bundle domain type
use crate::types::{BundleId, StoryItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryUser {
    /// Owner identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Avatar image locator
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl StoryUser {
    /// Create an owner without an avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }
}

/// Ordered stories posted by one owner, navigated as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryBundle {
    /// Unique bundle identifier
    pub id: BundleId,

    /// Bundle owner
    pub user: StoryUser,

    /// Items in display order
    pub items: Vec<StoryItem>,

    /// Whether the viewer has started watching this bundle
    #[serde(default)]
    pub seen: bool,

    /// When the bundle was last updated
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl StoryBundle {
    /// Create an unseen bundle
    pub fn new(id: BundleId, user: StoryUser, items: Vec<StoryItem>) -> Self {
        Self {
            id,
            user,
            items,
            seen: false,
            date: Utc::now(),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bundle has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any
    pub fn item(&self, index: usize) -> Option<&StoryItem> {
        self.items.get(index)
    }

    /// Mutable item at `index`, if any
    pub fn item_mut(&mut self, index: usize) -> Option<&mut StoryItem> {
        self.items.get_mut(index)
    }

    /// Index of the last item, `None` when empty
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }
}
