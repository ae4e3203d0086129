//! Recoverable session errors.
//!
//! None of these end a session. The controller reports them to the
//! presentation layer, which decides how to alert the player.

use crate::session::SessionStatus;
use crate::tool::Tool;

/// Error returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The action is not allowed in the current session status.
    #[display("Cannot {action} while session is {status}")]
    InvalidState {
        /// The rejected action.
        action: &'static str,
        /// Status at the time of the attempt.
        status: SessionStatus,
    },

    /// The tooth index is outside `0..tooth_count`.
    #[display("Tooth {index} is out of range (0..{count})")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of teeth configured.
        count: usize,
    },

    /// The armed tool does not match the tooth's next pending step.
    #[display("Tooth {unit} needs step {required} before the {tool} can be used")]
    SequenceViolation {
        /// Tooth index.
        unit: usize,
        /// Step the tooth is waiting for.
        required: u8,
        /// Tool that was applied.
        tool: Tool,
    },

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_violation_message() {
        let err = SessionError::SequenceViolation {
            unit: 3,
            required: 2,
            tool: Tool::Light,
        };
        assert_eq!(
            err.to_string(),
            "Tooth 3 needs step 2 before the Light can be used"
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let err = SessionError::InvalidState {
            action: "start",
            status: SessionStatus::Running,
        };
        assert_eq!(err.to_string(), "Cannot start while session is running");
    }
}
