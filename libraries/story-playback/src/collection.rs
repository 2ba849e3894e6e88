//! Bundle collection
//!
//! The explicitly owned context object holding every bundle of a viewing
//! session and the pointer to the bundle currently on screen.

use story_core::{BundleId, Result, StoryBundle, StoryError, StoryItem};

/// Ordered bundles plus the active bundle pointer
///
/// Bundles are supplied once and never reordered or removed; only the seen
/// flag, item readiness and measured durations change in place. The active
/// pointer is written by navigation only.
#[derive(Debug, Clone)]
pub struct BundleCollection {
    bundles: Vec<StoryBundle>,
    active: usize,
}

impl BundleCollection {
    /// Create a collection with the first bundle active
    pub fn new(bundles: Vec<StoryBundle>) -> Result<Self> {
        if bundles.is_empty() {
            return Err(StoryError::EmptyCollection);
        }
        Ok(Self { bundles, active: 0 })
    }

    /// Create a collection with `active` on screen
    pub fn with_active(bundles: Vec<StoryBundle>, active: &BundleId) -> Result<Self> {
        let mut collection = Self::new(bundles)?;
        collection.active = collection
            .position(active)
            .ok_or_else(|| StoryError::BundleNotFound(active.clone()))?;
        Ok(collection)
    }

    /// Number of bundles
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Always false; a collection holds at least one bundle
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// All bundles in display order
    pub fn bundles(&self) -> &[StoryBundle] {
        &self.bundles
    }

    /// Bundle by id
    pub fn get(&self, id: &BundleId) -> Option<&StoryBundle> {
        self.bundles.iter().find(|b| &b.id == id)
    }

    /// Position of a bundle in display order
    pub fn position(&self, id: &BundleId) -> Option<usize> {
        self.bundles.iter().position(|b| &b.id == id)
    }

    /// Identifier of the bundle on screen
    pub fn active_id(&self) -> &BundleId {
        &self.bundles[self.active].id
    }

    /// Position of the bundle on screen
    pub fn active_position(&self) -> usize {
        self.active
    }

    /// Bundle on screen
    pub fn active(&self) -> &StoryBundle {
        &self.bundles[self.active]
    }

    /// Mutable bundle on screen
    pub fn active_mut(&mut self) -> &mut StoryBundle {
        &mut self.bundles[self.active]
    }

    /// Item of the active bundle at `index`
    pub fn active_item(&self, index: usize) -> Option<&StoryItem> {
        self.active().item(index)
    }

    /// Mutable item of the active bundle at `index`
    pub fn active_item_mut(&mut self, index: usize) -> Option<&mut StoryItem> {
        self.active_mut().item_mut(index)
    }

    /// Whether the active bundle is the first one
    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    /// Whether the active bundle is the last one
    pub fn is_last(&self) -> bool {
        self.active + 1 == self.bundles.len()
    }

    /// Bundle before the active one
    pub fn previous_id(&self) -> Option<&BundleId> {
        self.active
            .checked_sub(1)
            .and_then(|i| self.bundles.get(i))
            .map(|b| &b.id)
    }

    /// Bundle after the active one
    pub fn next_id(&self) -> Option<&BundleId> {
        self.bundles.get(self.active + 1).map(|b| &b.id)
    }

    /// Point at another bundle; returns the previously active id
    pub(crate) fn set_active(&mut self, id: &BundleId) -> Result<BundleId> {
        let position = self
            .position(id)
            .ok_or_else(|| StoryError::BundleNotFound(id.clone()))?;
        let previous = self.active_id().clone();
        self.active = position;
        Ok(previous)
    }

    /// Mark the active bundle seen; true if it was unseen
    pub(crate) fn mark_active_seen(&mut self) -> bool {
        let bundle = self.active_mut();
        if bundle.seen {
            return false;
        }
        bundle.seen = true;
        true
    }

    /// Consume the collection, keeping in-place mutations
    pub fn into_bundles(self) -> Vec<StoryBundle> {
        self.bundles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_core::StoryUser;

    fn bundle(id: &str) -> StoryBundle {
        StoryBundle::new(
            BundleId::new(id),
            StoryUser::new(id, id),
            vec![StoryItem::image(format!("https://cdn.example.com/{id}.jpg"), 3.0)],
        )
    }

    #[test]
    fn empty_collection_is_rejected() {
        assert_eq!(
            BundleCollection::new(vec![]).unwrap_err(),
            StoryError::EmptyCollection
        );
    }

    #[test]
    fn with_active_unknown_bundle_is_rejected() {
        let err = BundleCollection::with_active(vec![bundle("a")], &BundleId::new("zz"))
            .unwrap_err();
        assert_eq!(err, StoryError::BundleNotFound(BundleId::new("zz")));
    }

    #[test]
    fn neighbours_follow_supplied_order() {
        let collection = BundleCollection::with_active(
            vec![bundle("a"), bundle("b"), bundle("c")],
            &BundleId::new("b"),
        )
        .unwrap();

        assert_eq!(collection.previous_id(), Some(&BundleId::new("a")));
        assert_eq!(collection.next_id(), Some(&BundleId::new("c")));
        assert!(!collection.is_first());
        assert!(!collection.is_last());
    }

    #[test]
    fn single_bundle_is_first_and_last() {
        let collection = BundleCollection::new(vec![bundle("a")]).unwrap();
        assert!(collection.is_first());
        assert!(collection.is_last());
        assert_eq!(collection.previous_id(), None);
        assert_eq!(collection.next_id(), None);
    }

    #[test]
    fn mark_seen_only_reports_first_time() {
        let mut collection = BundleCollection::new(vec![bundle("a")]).unwrap();
        assert!(collection.mark_active_seen());
        assert!(!collection.mark_active_seen());
        assert!(collection.active().seen);
    }

    #[test]
    fn set_active_returns_previous() {
        let mut collection = BundleCollection::new(vec![bundle("a"), bundle("b")]).unwrap();
        let previous = collection.set_active(&BundleId::new("b")).unwrap();
        assert_eq!(previous, BundleId::new("a"));
        assert_eq!(collection.active_id(), &BundleId::new("b"));
        assert_eq!(collection.active_position(), 1);
    }
}
