//! Story progress value
//!
//! A single continuous value whose integer part is the current item index in
//! the active bundle and whose fractional part is how full that item's
//! progress bar is.

use crate::types::{DURATION_SCALE, PROGRESS_STEP};
use story_core::StoryItem;

/// Accumulated floating error within this distance of a boundary counts as
/// reaching it
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Result of advancing progress by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still inside the same item
    Within,

    /// Reached the start of the item at this index
    Item(usize),

    /// Reached the end of the bundle
    End,
}

/// Progress through the active bundle
///
/// Invariant: `0 <= value <= item_count` for the bundle it is used with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    value: f64,
}

impl Progress {
    /// Progress at the start of the first item
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw progress value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Displayed item index, clamped to the last item
    ///
    /// `None` only for an empty bundle.
    pub fn current_index(&self, item_count: usize) -> Option<usize> {
        let last = item_count.checked_sub(1)?;
        Some((self.value.floor() as usize).min(last))
    }

    /// Whether the whole bundle has been played
    pub fn is_complete(&self, item_count: usize) -> bool {
        self.value >= item_count as f64
    }

    /// Fill fraction of the bar for the item at `index`
    pub fn fill(&self, index: usize) -> f64 {
        (self.value - index as f64).clamp(0.0, 1.0)
    }

    /// Fill fractions for every bar of a bundle
    pub fn fills(&self, item_count: usize) -> Vec<f64> {
        (0..item_count).map(|i| self.fill(i)).collect()
    }

    /// Add one tick's increment
    ///
    /// Crossing into the next item snaps to that item's start instead of
    /// carrying the remainder over, and the value never exceeds `item_count`.
    pub fn advance(&mut self, increment: f64, item_count: usize) -> Advance {
        let count = item_count as f64;
        if self.value >= count {
            self.value = count;
            return Advance::End;
        }

        let boundary = self.value.floor() + 1.0;
        let next = self.value + increment;
        if next + BOUNDARY_EPSILON < boundary {
            self.value = next;
            return Advance::Within;
        }

        self.value = boundary.min(count);
        if self.value >= count {
            Advance::End
        } else {
            Advance::Item(self.value as usize)
        }
    }

    /// Jump to the start of the item at `index`
    pub fn snap_to(&mut self, index: usize) {
        self.value = index as f64;
    }

    /// Back to the start of the first item
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Amount one tick adds for `item`
///
/// `None` when the item may not advance: it is not ready, or it is a video
/// without a measured duration yet. Images (and videos that reported a
/// non-positive duration) fall back to `fallback_secs` when their own
/// duration is unusable.
pub fn tick_increment(item: &StoryItem, fallback_secs: f64) -> Option<f64> {
    if !item.ready {
        return None;
    }
    let duration = item.effective_duration()?;
    let duration = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        fallback_secs
    };
    let scaled = duration * DURATION_SCALE;
    if scaled > 0.0 {
        Some(PROGRESS_STEP / scaled)
    } else {
        None
    }
}
