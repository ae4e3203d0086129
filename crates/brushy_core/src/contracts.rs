//! Contract-based validation for sealant steps.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} apply {Q}. Preconditions are always checked; postconditions run in
//! debug builds.

use tracing::{instrument, warn};

use crate::error::SessionError;
use crate::invariants::{InvariantSet, SealantInvariants};
use crate::sealant::SealantStateMachine;
use crate::tool::Tool;

/// A contract over state `S` and action `A`.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), SessionError>;
}

/// The player applying a tool to one tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolApplication {
    /// Tooth index.
    pub unit: usize,
    /// Tool being applied.
    pub tool: Tool,
}

impl ToolApplication {
    /// Creates a new application.
    pub fn new(unit: usize, tool: Tool) -> Self {
        Self { unit, tool }
    }
}

/// Precondition: the tooth exists.
pub struct UnitInRange;

impl UnitInRange {
    /// Checks the index against the number of teeth.
    #[instrument(skip(machine))]
    pub fn check(
        action: &ToolApplication,
        machine: &SealantStateMachine,
    ) -> Result<(), SessionError> {
        let count = machine.units().len();
        if action.unit < count {
            Ok(())
        } else {
            Err(SessionError::OutOfRange {
                index: action.unit,
                count,
            })
        }
    }
}

/// Precondition: the tool's step is the tooth's next pending step.
pub struct StepIsNext;

impl StepIsNext {
    /// Compares the tool step with the tooth's progress.
    #[instrument(skip(machine))]
    pub fn check(
        action: &ToolApplication,
        machine: &SealantStateMachine,
    ) -> Result<(), SessionError> {
        let Some(state) = machine.unit(action.unit) else {
            return UnitInRange::check(action, machine);
        };
        let required = state.next_pending_step();
        if action.tool.step() == required {
            Ok(())
        } else {
            warn!(unit = action.unit, required, tool = %action.tool, "Step out of order");
            Err(SessionError::SequenceViolation {
                unit: action.unit,
                required,
                tool: action.tool,
            })
        }
    }
}

/// Contract for applying a tool.
///
/// Preconditions:
/// - Tooth index in range
/// - Tool step equals the tooth's next pending step
///
/// Postconditions:
/// - No flag was cleared on any tooth
/// - Score did not decrease
/// - Sealant invariants hold
pub struct ApplyToolContract;

impl Contract<SealantStateMachine, ToolApplication> for ApplyToolContract {
    fn pre(machine: &SealantStateMachine, action: &ToolApplication) -> Result<(), SessionError> {
        UnitInRange::check(action, machine)?;
        StepIsNext::check(action, machine)?;
        Ok(())
    }

    fn post(before: &SealantStateMachine, after: &SealantStateMachine) -> Result<(), SessionError> {
        let monotonic = before.units().len() == after.units().len()
            && after
                .units()
                .iter()
                .zip(before.units())
                .all(|(now, then)| now.extends(then));
        if !monotonic {
            return Err(SessionError::InvariantViolation(
                "Postcondition failed: stage flags were cleared".to_string(),
            ));
        }
        if after.score() < before.score() {
            return Err(SessionError::InvariantViolation(format!(
                "Postcondition failed: score dropped from {} to {}",
                before.score(),
                after.score()
            )));
        }
        SealantInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            SessionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::unit::StageState;

    fn machine() -> SealantStateMachine {
        SealantStateMachine::new(&GameConfig::default().with_tooth_count(3))
    }

    #[test]
    fn test_precondition_first_step() {
        let m = machine();
        assert!(ApplyToolContract::pre(&m, &ToolApplication::new(0, Tool::Cleaner)).is_ok());
    }

    #[test]
    fn test_precondition_out_of_range() {
        let m = machine();
        assert!(matches!(
            ApplyToolContract::pre(&m, &ToolApplication::new(3, Tool::Cleaner)),
            Err(SessionError::OutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_precondition_wrong_step() {
        let m = machine();
        assert!(matches!(
            ApplyToolContract::pre(&m, &ToolApplication::new(0, Tool::Sealant)),
            Err(SessionError::SequenceViolation { required: 1, .. })
        ));
    }

    #[test]
    fn test_postcondition_holds_after_step() {
        let before = machine();
        let mut after = before.clone();
        after.arm_tool(Tool::Cleaner);
        after.apply_tool(1).unwrap();
        assert!(ApplyToolContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_cleared_flag() {
        let mut before = machine();
        before.arm_tool(Tool::Cleaner);
        before.apply_tool(0).unwrap();

        let mut after = before.clone();
        after.units[0] = StageState::new();
        assert!(ApplyToolContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_score_drop() {
        let mut before = machine();
        before.arm_tool(Tool::Cleaner);
        before.apply_tool(0).unwrap();

        let mut after = before.clone();
        after.score = 0;
        assert!(ApplyToolContract::post(&before, &after).is_err());
    }
}
