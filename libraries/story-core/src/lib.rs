//! Story Player Core
//!
//! Platform-agnostic core types, traits, and error handling for the story viewer.
//!
//! This crate provides the building blocks shared by the playback engine, the
//! media cache and host applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `StoryBundle`, `StoryItem`, `StoryUser`, identifiers
//! - **Loader Contract**: `MediaLoader`, `LoadTicket`, `LocalResource`
//! - **Error Handling**: Unified `StoryError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use story_core::types::{BundleId, StoryBundle, StoryItem, StoryUser};
//!
//! let owner = StoryUser::new("alice", "Alice");
//! let bundle = StoryBundle::new(
//!     BundleId::new("bundle-1"),
//!     owner,
//!     vec![
//!         StoryItem::image("https://cdn.example.com/1.jpg", 3.0),
//!         StoryItem::video("https://cdn.example.com/2.mp4"),
//!     ],
//! );
//!
//! assert_eq!(bundle.len(), 2);
//! assert!(!bundle.seen);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, StoryError};
pub use traits::MediaLoader;
pub use types::{
    BundleId, ItemId, LoadTicket, LocalResource, MediaKind, StoryBundle, StoryItem, StoryType,
    StoryUser,
};
