//! Bundle navigation
//!
//! Decides what happens when a bundle runs out of items in either direction:
//! switch bundle, rewind the current video, or dismiss the viewer.

use crate::collection::BundleCollection;
use story_core::{BundleId, Result};
use tracing::{debug, info};

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Active bundle switched; progress and playback must be reset
    BundleChanged {
        /// Bundle that was on screen
        from: BundleId,
        /// Bundle now on screen
        to: BundleId,
    },

    /// No previous bundle and the current item is a video: rewind it
    RestartItem,

    /// Last item of the last bundle finished: close the viewer
    Dismiss,

    /// Nothing to do
    Stay,
}

/// Navigates the active pointer of a `BundleCollection`
///
/// The navigator is the only writer of the active bundle pointer.
pub struct BundleNavigator<'a> {
    bundles: &'a mut BundleCollection,
}

impl<'a> BundleNavigator<'a> {
    /// Borrow a collection for navigation
    pub fn new(bundles: &'a mut BundleCollection) -> Self {
        Self { bundles }
    }

    /// Move to the previous bundle
    ///
    /// On the first bundle there is nothing to go back to; a video item is
    /// rewound instead and an image is left alone.
    pub fn previous(&mut self, current_index: Option<usize>) -> Navigation {
        if let Some(previous) = self.bundles.previous_id().cloned() {
            return self.switch_to(&previous);
        }

        let is_video = current_index
            .and_then(|i| self.bundles.active_item(i))
            .is_some_and(|item| item.is_video());
        if is_video {
            debug!(bundle = %self.bundles.active_id(), "No previous bundle, rewinding video");
            Navigation::RestartItem
        } else {
            Navigation::Stay
        }
    }

    /// Move past the current item when it is the last of its bundle
    ///
    /// Past the last item of the last bundle the session is dismissed. An
    /// empty bundle counts as finished.
    pub fn next(&mut self, current_index: Option<usize>) -> Navigation {
        let last_index = self.bundles.active().last_index();
        let on_last_item = match (current_index, last_index) {
            (Some(current), Some(last)) => current >= last,
            _ => true,
        };
        if !on_last_item {
            return Navigation::Stay;
        }

        match self.bundles.next_id().cloned() {
            Some(next) => self.switch_to(&next),
            None => {
                info!(bundle = %self.bundles.active_id(), "Last story finished, dismissing");
                Navigation::Dismiss
            }
        }
    }

    /// Show a specific bundle (e.g. picked from the story tray)
    pub fn jump_to(&mut self, id: &BundleId) -> Result<Navigation> {
        if self.bundles.active_id() == id {
            return Ok(Navigation::Stay);
        }
        let from = self.bundles.set_active(id)?;
        info!(from = %from, to = %id, "Jumped to bundle");
        Ok(Navigation::BundleChanged {
            from,
            to: id.clone(),
        })
    }

    fn switch_to(&mut self, id: &BundleId) -> Navigation {
        match self.bundles.set_active(id) {
            Ok(from) => {
                info!(from = %from, to = %id, "Bundle changed");
                Navigation::BundleChanged {
                    from,
                    to: id.clone(),
                }
            }
            Err(_) => Navigation::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_core::{StoryBundle, StoryError, StoryItem, StoryUser};

    fn bundle(id: &str, items: Vec<StoryItem>) -> StoryBundle {
        StoryBundle::new(BundleId::new(id), StoryUser::new(id, id), items)
    }

    fn images(n: usize) -> Vec<StoryItem> {
        (0..n)
            .map(|i| StoryItem::image(format!("{i}.jpg"), 3.0))
            .collect()
    }

    fn collection() -> BundleCollection {
        BundleCollection::new(vec![
            bundle("a", vec![StoryItem::video("a.mp4"), StoryItem::image("a.jpg", 3.0)]),
            bundle("b", images(2)),
            bundle("c", images(1)),
        ])
        .unwrap()
    }

    #[test]
    fn next_before_last_item_stays() {
        let mut bundles = collection();
        let nav = BundleNavigator::new(&mut bundles).next(Some(0));
        assert_eq!(nav, Navigation::Stay);
        assert_eq!(bundles.active_id(), &BundleId::new("a"));
    }

    #[test]
    fn next_on_last_item_switches_bundle() {
        let mut bundles = collection();
        let nav = BundleNavigator::new(&mut bundles).next(Some(1));
        assert_eq!(
            nav,
            Navigation::BundleChanged {
                from: BundleId::new("a"),
                to: BundleId::new("b"),
            }
        );
        assert_eq!(bundles.active_id(), &BundleId::new("b"));
    }

    #[test]
    fn next_on_last_bundle_dismisses() {
        let mut bundles = collection();
        BundleNavigator::new(&mut bundles)
            .jump_to(&BundleId::new("c"))
            .unwrap();
        let nav = BundleNavigator::new(&mut bundles).next(Some(0));
        assert_eq!(nav, Navigation::Dismiss);
        assert_eq!(bundles.active_id(), &BundleId::new("c"));
    }

    #[test]
    fn previous_switches_to_preceding_bundle() {
        let mut bundles = collection();
        BundleNavigator::new(&mut bundles)
            .jump_to(&BundleId::new("c"))
            .unwrap();
        let nav = BundleNavigator::new(&mut bundles).previous(Some(0));
        assert_eq!(
            nav,
            Navigation::BundleChanged {
                from: BundleId::new("c"),
                to: BundleId::new("b"),
            }
        );
    }

    #[test]
    fn previous_on_first_bundle_video_restarts() {
        let mut bundles = collection();
        let nav = BundleNavigator::new(&mut bundles).previous(Some(0));
        assert_eq!(nav, Navigation::RestartItem);
        assert_eq!(bundles.active_id(), &BundleId::new("a"));
    }

    #[test]
    fn previous_on_first_bundle_image_stays() {
        let mut bundles = collection();
        let nav = BundleNavigator::new(&mut bundles).previous(Some(1));
        assert_eq!(nav, Navigation::Stay);
    }

    #[test]
    fn empty_bundle_counts_as_finished() {
        let mut bundles =
            BundleCollection::new(vec![bundle("empty", vec![]), bundle("b", images(1))]).unwrap();
        let nav = BundleNavigator::new(&mut bundles).next(None);
        assert!(matches!(nav, Navigation::BundleChanged { .. }));
    }

    #[test]
    fn jump_to_unknown_bundle_fails() {
        let mut bundles = collection();
        let err = BundleNavigator::new(&mut bundles)
            .jump_to(&BundleId::new("zz"))
            .unwrap_err();
        assert_eq!(err, StoryError::BundleNotFound(BundleId::new("zz")));
    }

    #[test]
    fn jump_to_active_bundle_stays() {
        let mut bundles = collection();
        let nav = BundleNavigator::new(&mut bundles)
            .jump_to(&BundleId::new("a"))
            .unwrap();
        assert_eq!(nav, Navigation::Stay);
    }
}
