//! Ordered sealant procedure across all teeth.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::contracts::{ApplyToolContract, Contract, ToolApplication};
use crate::error::SessionError;
use crate::tool::{Stage, Tool};
use crate::unit::StageState;

/// Result of applying the armed tool to a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// Nothing is armed; nothing changed.
    NoToolArmed,
    /// The stage was completed.
    Applied {
        /// Stage just completed.
        stage: Stage,
        /// Score after the reward.
        score: u32,
        /// Whether every tooth is now fully cured.
        all_complete: bool,
    },
}

/// Tracks every tooth through clean, etch, bond, seal and cure.
///
/// Tool armament is global: one tool is armed at a time and applies to
/// whichever tooth is clicked. Different teeth may sit at different steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealantStateMachine {
    pub(crate) units: Vec<StageState>,
    armed: Option<Tool>,
    pub(crate) score: u32,
    pub(crate) successful_steps: u32,
    pub(crate) step_reward: u32,
    per_unit_bonus: u32,
}

impl SealantStateMachine {
    /// Creates a procedure with every tooth untreated.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            units: vec![StageState::new(); *config.tooth_count()],
            armed: None,
            score: 0,
            successful_steps: 0,
            step_reward: *config.step_reward(),
            per_unit_bonus: *config.per_unit_bonus(),
        }
    }

    /// Clears every tooth, the armed tool and the score.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.units.iter_mut().for_each(|u| *u = StageState::new());
        self.armed = None;
        self.score = 0;
        self.successful_steps = 0;
        debug!(teeth = self.units.len(), "Sealant state reset");
    }

    /// Arms a tool. Has no effect on any tooth by itself.
    #[instrument(skip(self))]
    pub fn arm_tool(&mut self, tool: Tool) {
        debug!(step = tool.step(), "Tool armed");
        self.armed = Some(tool);
    }

    /// The currently armed tool.
    pub fn armed(&self) -> Option<Tool> {
        self.armed
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of steps completed across all teeth.
    pub fn successful_steps(&self) -> u32 {
        self.successful_steps
    }

    /// Progress of every tooth.
    pub fn units(&self) -> &[StageState] {
        &self.units
    }

    /// Progress of one tooth.
    pub fn unit(&self, index: usize) -> Option<&StageState> {
        self.units.get(index)
    }

    /// Applies the armed tool to a tooth.
    ///
    /// Fails with [`SessionError::OutOfRange`] for a bad index and with
    /// [`SessionError::SequenceViolation`] when the tool is not the tooth's
    /// next step. Neither failure changes any state.
    #[instrument(skip(self), fields(armed = ?self.armed))]
    pub fn apply_tool(&mut self, unit: usize) -> Result<ApplyOutcome, SessionError> {
        if unit >= self.units.len() {
            warn!(unit, count = self.units.len(), "Tool applied outside the jaw");
            return Err(SessionError::OutOfRange {
                index: unit,
                count: self.units.len(),
            });
        }
        let Some(tool) = self.armed else {
            debug!("No tool armed");
            return Ok(ApplyOutcome::NoToolArmed);
        };

        let action = ToolApplication::new(unit, tool);
        ApplyToolContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let stage = tool.stage();
        self.units[unit].advance(stage);
        self.score = self.score.saturating_add(self.step_reward);
        self.successful_steps += 1;

        #[cfg(debug_assertions)]
        ApplyToolContract::post(&before, self)?;

        let all_complete = self.is_complete();
        debug!(unit, %stage, score = self.score, all_complete, "Stage completed");
        Ok(ApplyOutcome::Applied {
            stage,
            score: self.score,
            all_complete,
        })
    }

    /// Number of fully cured teeth.
    pub fn perfect_unit_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_complete()).count()
    }

    /// Whether every tooth is fully cured.
    pub fn is_complete(&self) -> bool {
        self.units.iter().all(StageState::is_complete)
    }

    /// Fraction of teeth fully cured.
    pub fn completion_ratio(&self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        self.perfect_unit_count() as f64 / self.units.len() as f64
    }

    /// Raises the score to the per-tooth bonus total if that is higher.
    ///
    /// Never lowers the score. Returns the final score.
    #[instrument(skip(self))]
    pub fn finalize_score(&mut self) -> u32 {
        let bonus = (self.perfect_unit_count() as u32).saturating_mul(self.per_unit_bonus);
        if bonus > self.score {
            info!(previous = self.score, bonus, "Completion bonus applied");
            self.score = bonus;
        }
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig::default().with_tooth_count(2)
    }

    fn treat(machine: &mut SealantStateMachine, unit: usize) -> ApplyOutcome {
        let mut last = ApplyOutcome::NoToolArmed;
        for tool in Tool::ALL {
            machine.arm_tool(tool);
            last = machine.apply_tool(unit).expect("in-order step");
        }
        last
    }

    #[test]
    fn test_no_tool_is_noop() {
        let mut machine = SealantStateMachine::new(&small_config());
        assert_eq!(machine.apply_tool(0), Ok(ApplyOutcome::NoToolArmed));
        assert_eq!(machine.unit(0), Some(&StageState::new()));
    }

    #[test]
    fn test_out_of_range_reported() {
        let mut machine = SealantStateMachine::new(&small_config());
        machine.arm_tool(Tool::Cleaner);
        assert_eq!(
            machine.apply_tool(2),
            Err(SessionError::OutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_skip_is_sequence_violation() {
        let mut machine = SealantStateMachine::new(&small_config());
        machine.arm_tool(Tool::Bond);
        let err = machine.apply_tool(1).unwrap_err();
        assert_eq!(
            err,
            SessionError::SequenceViolation {
                unit: 1,
                required: 1,
                tool: Tool::Bond
            }
        );
        assert_eq!(machine.unit(1), Some(&StageState::new()));
        assert_eq!(machine.score(), 0);
    }

    #[test]
    fn test_going_back_is_sequence_violation() {
        let mut machine = SealantStateMachine::new(&small_config());
        machine.arm_tool(Tool::Cleaner);
        machine.apply_tool(0).unwrap();
        machine.arm_tool(Tool::Etchant);
        machine.apply_tool(0).unwrap();
        machine.arm_tool(Tool::Cleaner);
        assert!(matches!(
            machine.apply_tool(0),
            Err(SessionError::SequenceViolation { required: 3, .. })
        ));
        assert_eq!(machine.unit(0).map(StageState::completed_count), Some(2));
    }

    #[test]
    fn test_teeth_progress_independently() {
        let mut machine = SealantStateMachine::new(&small_config());
        machine.arm_tool(Tool::Cleaner);
        machine.apply_tool(0).unwrap();
        machine.apply_tool(1).unwrap();
        machine.arm_tool(Tool::Etchant);
        machine.apply_tool(1).unwrap();
        assert_eq!(machine.unit(0).unwrap().next_pending_step(), 2);
        assert_eq!(machine.unit(1).unwrap().next_pending_step(), 3);
        assert_eq!(machine.score(), 30);
    }

    #[test]
    fn test_completion_and_bonus() {
        let mut machine = SealantStateMachine::new(&small_config());
        let first = treat(&mut machine, 0);
        assert!(matches!(
            first,
            ApplyOutcome::Applied {
                stage: Stage::Cured,
                all_complete: false,
                ..
            }
        ));
        let second = treat(&mut machine, 1);
        assert!(matches!(
            second,
            ApplyOutcome::Applied {
                all_complete: true,
                score: 100,
                ..
            }
        ));
        assert_eq!(machine.completion_ratio(), 1.0);
        // 2 teeth x 50 bonus = 100, equal to 10 steps x 10
        assert_eq!(machine.finalize_score(), 100);

        let mut generous = SealantStateMachine::new(&small_config().with_per_unit_bonus(80));
        treat(&mut generous, 0);
        treat(&mut generous, 1);
        assert_eq!(generous.finalize_score(), 160);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut machine = SealantStateMachine::new(&small_config());
        treat(&mut machine, 0);
        machine.reset();
        assert_eq!(machine.armed(), None);
        assert_eq!(machine.score(), 0);
        assert_eq!(machine.perfect_unit_count(), 0);
    }
}
