//! Stage order invariant: a stage is never done before its predecessor.

use super::Invariant;
use crate::sealant::SealantStateMachine;

/// Invariant: on every tooth, flag k implies flag k-1.
pub struct StageOrderInvariant;

impl Invariant<SealantStateMachine> for StageOrderInvariant {
    fn holds(machine: &SealantStateMachine) -> bool {
        machine.units().iter().all(|unit| unit.is_ordered())
    }

    fn description() -> &'static str {
        "Sealant stages are completed in order on every tooth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::tool::Tool;
    use crate::unit::StageState;

    #[test]
    fn test_fresh_machine_holds() {
        let machine = SealantStateMachine::new(&GameConfig::default());
        assert!(StageOrderInvariant::holds(&machine));
    }

    #[test]
    fn test_in_order_steps_hold() {
        let mut machine = SealantStateMachine::new(&GameConfig::default());
        machine.arm_tool(Tool::Cleaner);
        machine.apply_tool(0).unwrap();
        machine.arm_tool(Tool::Etchant);
        machine.apply_tool(0).unwrap();
        assert!(StageOrderInvariant::holds(&machine));
    }

    #[test]
    fn test_skipped_stage_violates() {
        let mut machine = SealantStateMachine::new(&GameConfig::default());
        machine.units[7] = StageState::from_flags([true, true, false, true, false]);
        assert!(!StageOrderInvariant::holds(&machine));
    }
}
