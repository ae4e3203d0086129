//! Sealant instruments and the treatment stages they perform.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An instrument the player can arm during the sealant procedure.
///
/// Each tool performs exactly one [`Stage`] and carries that stage's
/// ordinal step (1-5).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tool {
    /// Polishing brush (step 1).
    Cleaner,
    /// Acid etchant (step 2).
    Etchant,
    /// Bonding agent (step 3).
    Bond,
    /// Sealant resin (step 4).
    Sealant,
    /// Curing light (step 5).
    Light,
}

impl Tool {
    /// All tools in procedure order.
    pub const ALL: [Tool; 5] = [
        Tool::Cleaner,
        Tool::Etchant,
        Tool::Bond,
        Tool::Sealant,
        Tool::Light,
    ];

    /// Ordinal step of this tool, 1-based.
    pub fn step(self) -> u8 {
        self.stage().step()
    }

    /// The stage this tool completes.
    pub fn stage(self) -> Stage {
        match self {
            Tool::Cleaner => Stage::Cleaned,
            Tool::Etchant => Stage::Etched,
            Tool::Bond => Stage::Bonded,
            Tool::Sealant => Stage::Sealed,
            Tool::Light => Stage::Cured,
        }
    }

    /// Looks up the tool for a 1-based step.
    #[instrument]
    pub fn from_step(step: u8) -> Option<Self> {
        Stage::from_step(step).map(Stage::tool)
    }
}

/// One of the ordered sealant treatment states of a tooth.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Stage {
    /// Surface cleaned.
    #[display("cleaned")]
    Cleaned,
    /// Enamel etched.
    #[display("etched")]
    Etched,
    /// Bonding agent applied.
    #[display("bonded")]
    Bonded,
    /// Sealant applied.
    #[display("sealed")]
    Sealed,
    /// Sealant cured.
    #[display("cured")]
    Cured,
}

impl Stage {
    /// Number of stages per tooth.
    pub const COUNT: usize = 5;

    /// All stages in order.
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Cleaned,
        Stage::Etched,
        Stage::Bonded,
        Stage::Sealed,
        Stage::Cured,
    ];

    /// Zero-based position in the sequence.
    pub fn index(self) -> usize {
        match self {
            Stage::Cleaned => 0,
            Stage::Etched => 1,
            Stage::Bonded => 2,
            Stage::Sealed => 3,
            Stage::Cured => 4,
        }
    }

    /// One-based step number.
    pub fn step(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Looks up the stage for a 1-based step.
    pub fn from_step(step: u8) -> Option<Self> {
        match step {
            1..=5 => Some(Self::ALL[usize::from(step) - 1]),
            _ => None,
        }
    }

    /// The stage that must already be complete, if any.
    pub fn predecessor(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// The tool that performs this stage.
    pub fn tool(self) -> Tool {
        Tool::ALL[self.index()]
    }

    /// Lowercase stage name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Cleaned => "cleaned",
            Stage::Etched => "etched",
            Stage::Bonded => "bonded",
            Stage::Sealed => "sealed",
            Stage::Cured => "cured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tool_steps_are_ordinal() {
        let steps: Vec<u8> = Tool::iter().map(Tool::step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tool_stage_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(tool.stage().tool(), tool);
            assert_eq!(Tool::from_step(tool.step()), Some(tool));
        }
        assert_eq!(Tool::from_step(0), None);
        assert_eq!(Tool::from_step(6), None);
    }

    #[test]
    fn test_tool_parses_case_insensitively() {
        assert_eq!(Tool::from_str("light"), Ok(Tool::Light));
        assert_eq!(Tool::from_str("ETCHANT"), Ok(Tool::Etchant));
        assert!(Tool::from_str("drill").is_err());
    }

    #[test]
    fn test_stage_display_matches_name() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string(), stage.name());
        }
        assert_eq!(Stage::Cured.to_string(), "cured");
    }

    #[test]
    fn test_stage_predecessor() {
        assert_eq!(Stage::Cleaned.predecessor(), None);
        assert_eq!(Stage::Cured.predecessor(), Some(Stage::Sealed));
        assert_eq!(Stage::iter().count(), Stage::COUNT);
    }
}
