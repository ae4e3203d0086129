//! Per-tooth sealant progress.

use serde::{Deserialize, Serialize};

use crate::tool::Stage;

/// Five ordered completion flags for one tooth.
///
/// Flags only ever flip from `false` to `true`, and only in order:
/// the next pending stage is always the first `false` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageState {
    flags: [bool; Stage::COUNT],
}

impl StageState {
    /// A tooth with no treatment applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given stage has been completed.
    pub fn is_done(&self, stage: Stage) -> bool {
        self.flags[stage.index()]
    }

    /// Number of completed stages.
    pub fn completed_count(&self) -> usize {
        self.flags.iter().filter(|done| **done).count()
    }

    /// The stage that must be applied next, or `None` once cured.
    pub fn next_pending(&self) -> Option<Stage> {
        Stage::from_step(self.next_pending_step())
    }

    /// One plus the number of completed stages.
    pub fn next_pending_step(&self) -> u8 {
        self.completed_count() as u8 + 1
    }

    /// Whether every stage is complete.
    pub fn is_complete(&self) -> bool {
        self.flags.iter().all(|done| *done)
    }

    /// The most advanced completed stage.
    pub fn latest(&self) -> Option<Stage> {
        Stage::ALL.iter().rev().copied().find(|s| self.is_done(*s))
    }

    /// Completes `stage` if it is the next pending one.
    ///
    /// Returns `false` and leaves the flags untouched otherwise.
    pub(crate) fn advance(&mut self, stage: Stage) -> bool {
        if self.next_pending() != Some(stage) {
            return false;
        }
        self.flags[stage.index()] = true;
        true
    }

    /// True when no flag is set without its predecessor.
    pub fn is_ordered(&self) -> bool {
        Stage::ALL.iter().all(|stage| match stage.predecessor() {
            Some(prev) => !self.is_done(*stage) || self.is_done(prev),
            None => true,
        })
    }

    /// True when every flag set in `earlier` is still set here.
    pub fn extends(&self, earlier: &StageState) -> bool {
        self.flags
            .iter()
            .zip(earlier.flags.iter())
            .all(|(now, before)| *now || !*before)
    }

    #[cfg(test)]
    pub(crate) fn from_flags(flags: [bool; Stage::COUNT]) -> Self {
        Self { flags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_step_one() {
        let state = StageState::new();
        assert_eq!(state.next_pending_step(), 1);
        assert_eq!(state.next_pending(), Some(Stage::Cleaned));
        assert_eq!(state.latest(), None);
    }

    #[test]
    fn test_advance_in_order() {
        let mut state = StageState::new();
        for stage in Stage::ALL {
            assert!(state.advance(stage));
            assert!(state.is_ordered());
        }
        assert!(state.is_complete());
        assert_eq!(state.next_pending(), None);
        assert_eq!(state.next_pending_step(), 6);
        assert_eq!(state.latest(), Some(Stage::Cured));
    }

    #[test]
    fn test_advance_rejects_skips_and_repeats() {
        let mut state = StageState::new();
        assert!(!state.advance(Stage::Etched));
        assert!(state.advance(Stage::Cleaned));
        assert!(!state.advance(Stage::Cleaned));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn test_out_of_order_flags_detected() {
        let state = StageState::from_flags([true, false, true, false, false]);
        assert!(!state.is_ordered());
    }

    #[test]
    fn test_extends() {
        let before = StageState::from_flags([true, false, false, false, false]);
        let after = StageState::from_flags([true, true, false, false, false]);
        assert!(after.extends(&before));
        assert!(!before.extends(&after));
    }
}
