//! Brushy core - pure game logic for the tooth-brushing and sealant drills.
//!
//! # Architecture
//!
//! - **Configuration**: static constants with validation
//! - **Rating**: ratio to star rating
//! - **Brushing**: angle-based scoring of orientation samples
//! - **Sealant**: per-tooth ordered stage tracking gated by the armed tool
//! - **Session**: lifecycle, countdown and routing between the two modes
//!
//! Nothing here performs I/O or sleeps. Time arrives through
//! [`SessionController::tick`], scheduled via a [`TickScheduler`], and
//! notifications leave through an [`EventSink`].
//!
//! # Example
//!
//! ```
//! use brushy_core::{GameConfig, GameMode, ManualScheduler, SessionController, Tool};
//!
//! let mut session: SessionController =
//!     SessionController::new(GameConfig::default(), ManualScheduler::new(), Vec::new())?;
//! session.start(GameMode::Sealant)?;
//! session.arm_tool(Tool::Cleaner)?;
//! session.apply_tool(0)?;
//! assert_eq!(session.sealant().unit(0).map(|u| u.next_pending_step()), Some(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod brushing;
mod config;
mod error;
mod events;
mod rating;
mod scheduler;
mod sealant;
mod session;
mod tool;
mod unit;

pub mod contracts;
pub mod invariants;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Errors
pub use error::SessionError;

// Crate-level exports - Scoring
pub use brushing::{BrushingScorer, OrientationSample};
pub use rating::Rating;
pub use sealant::{ApplyOutcome, SealantStateMachine};
pub use tool::{Stage, Tool};
pub use unit::StageState;

// Crate-level exports - Session lifecycle
pub use events::{EventSink, NullSink, SessionEvent};
pub use scheduler::{Generation, ManualScheduler, TickScheduler};
pub use session::{
    EndReason, GameMode, InputEvent, SessionController, SessionStatus, SessionSummary, TICK_PERIOD,
};
