//! Interruption coordination
//!
//! Folds the on-screen keyboard and the reaction animation overlay into a
//! single "paused" signal. Taps are disabled under the same condition.

/// Combined interruption state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptionCoordinator {
    keyboard_open: bool,
    reaction_active: bool,
}

impl InterruptionCoordinator {
    /// No interruption active
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether ticking is suspended
    pub fn is_paused(&self) -> bool {
        self.keyboard_open || self.reaction_active
    }

    /// Whether tap navigation is rejected
    pub fn is_tap_disabled(&self) -> bool {
        self.is_paused()
    }

    /// Whether the keyboard is open
    pub fn keyboard_open(&self) -> bool {
        self.keyboard_open
    }

    /// Whether the reaction animation is running
    pub fn reaction_active(&self) -> bool {
        self.reaction_active
    }

    /// Update the keyboard signal
    ///
    /// Returns the new paused value if it changed.
    pub fn set_keyboard_open(&mut self, open: bool) -> Option<bool> {
        self.update(|s| s.keyboard_open = open)
    }

    /// Update the reaction animation signal
    ///
    /// Returns the new paused value if it changed.
    pub fn set_reaction_active(&mut self, active: bool) -> Option<bool> {
        self.update(|s| s.reaction_active = active)
    }

    fn update(&mut self, apply: impl FnOnce(&mut Self)) -> Option<bool> {
        let before = self.is_paused();
        apply(self);
        let after = self.is_paused();
        (before != after).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_signal_pauses() {
        let mut coordinator = InterruptionCoordinator::new();
        assert!(!coordinator.is_paused());

        assert_eq!(coordinator.set_keyboard_open(true), Some(true));
        assert!(coordinator.is_paused());
        assert!(coordinator.is_tap_disabled());

        assert_eq!(coordinator.set_keyboard_open(false), Some(false));
        assert_eq!(coordinator.set_reaction_active(true), Some(true));
        assert!(coordinator.is_tap_disabled());
    }

    #[test]
    fn overlapping_signals_report_one_change_each_way() {
        let mut coordinator = InterruptionCoordinator::new();
        assert_eq!(coordinator.set_keyboard_open(true), Some(true));
        assert_eq!(coordinator.set_reaction_active(true), None);
        assert_eq!(coordinator.set_keyboard_open(false), None);
        assert!(coordinator.is_paused());
        assert_eq!(coordinator.set_reaction_active(false), Some(false));
        assert!(!coordinator.is_paused());
    }

    #[test]
    fn repeated_value_is_not_a_change() {
        let mut coordinator = InterruptionCoordinator::new();
        assert_eq!(coordinator.set_keyboard_open(false), None);
        coordinator.set_keyboard_open(true);
        assert_eq!(coordinator.set_keyboard_open(true), None);
    }
}
