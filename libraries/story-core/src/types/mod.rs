mod bundle;
mod ids;
mod item;
mod media;

pub use bundle::{StoryBundle, StoryUser};
pub use ids::{BundleId, ItemId};
pub use item::{MediaKind, StoryItem, StoryType};
pub use media::{LoadTicket, LocalResource};
