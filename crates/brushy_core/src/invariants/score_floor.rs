//! Score floor invariant: every successful step is paid for.

use super::Invariant;
use crate::sealant::SealantStateMachine;

/// Invariant: the sealant score is at least `successful steps x step reward`.
///
/// The completion bonus may raise the score above the floor, never below.
pub struct ScoreFloorInvariant;

impl Invariant<SealantStateMachine> for ScoreFloorInvariant {
    fn holds(machine: &SealantStateMachine) -> bool {
        let floor = machine
            .successful_steps
            .saturating_mul(machine.step_reward);
        let completed: usize = machine.units().iter().map(|u| u.completed_count()).sum();
        machine.score() >= floor && completed == machine.successful_steps as usize
    }

    fn description() -> &'static str {
        "Sealant score covers every completed step"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::tool::Tool;

    #[test]
    fn test_holds_after_step_and_bonus() {
        let mut machine = SealantStateMachine::new(&GameConfig::default().with_tooth_count(1));
        for tool in Tool::ALL {
            machine.arm_tool(tool);
            machine.apply_tool(0).unwrap();
        }
        assert!(ScoreFloorInvariant::holds(&machine));
        machine.finalize_score();
        assert!(ScoreFloorInvariant::holds(&machine));
    }

    #[test]
    fn test_underpaid_score_violates() {
        let mut machine = SealantStateMachine::new(&GameConfig::default());
        machine.arm_tool(Tool::Cleaner);
        machine.apply_tool(0).unwrap();
        machine.score = 5;
        assert!(!ScoreFloorInvariant::holds(&machine));
    }
}
