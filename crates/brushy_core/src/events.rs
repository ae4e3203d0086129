//! Notifications emitted to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::session::{GameMode, SessionSummary};
use crate::tool::{Stage, Tool};

/// Something the presentation layer may want to redraw or announce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session began.
    SessionStarted {
        /// Active mode.
        mode: GameMode,
        /// Countdown length.
        seconds: u32,
    },
    /// The score changed.
    ScoreChanged(u32),
    /// One second elapsed.
    TimeChanged(u32),
    /// A tool was armed.
    ToolArmed(Tool),
    /// A tooth completed a stage.
    UnitStageChanged {
        /// Tooth index.
        unit: usize,
        /// Stage just completed.
        stage: Stage,
    },
    /// The armed tool was applied out of order; complete prior steps first.
    SequenceViolation {
        /// Tooth index.
        unit: usize,
        /// Step the tooth is waiting for.
        required_step: u8,
    },
    /// A tool was applied to a tooth that does not exist.
    UnitOutOfRange {
        /// The requested index.
        unit: usize,
    },
    /// The session finished.
    SessionEnded(SessionSummary),
    /// The session returned to idle.
    SessionReset,
}

/// Receives session notifications.
pub trait EventSink {
    /// Delivers one event. Must not fail.
    fn emit(&mut self, event: SessionEvent);
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SessionEvent) {}
}
