//! Brushy - tooth-brushing and dental-sealant drills for the terminal.
//!
//! # Architecture
//!
//! - **Core**: session lifecycle and scoring live in [`brushy_core`]
//! - **Settings**: TOML configuration loading
//! - **Ticker**: tokio-driven countdown behind the core's `TickScheduler` seam
//! - **TUI**: ratatui front end with mouse and keyboard input
//!
//! # Example
//!
//! ```no_run
//! use brushy::{GameMode, load_config, run_tui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config("brushy.toml")?;
//! run_tui(config, GameMode::Sealant).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod settings;
mod ticker;

pub mod cli;
pub mod tui;

// Crate-level exports - Configuration
pub use settings::{DEFAULT_CONFIG_PATH, load_config, render_config};

// Crate-level exports - Countdown
pub use ticker::TokioTicker;

// Crate-level exports - Terminal UI
pub use tui::run_tui;

// Crate-level exports - Game engine
pub use brushy_core::{
    ConfigError, EndReason, GameConfig, GameMode, Generation, InputEvent, ManualScheduler,
    OrientationSample, Rating, SessionController, SessionError, SessionEvent, SessionStatus,
    SessionSummary, Stage, StageState, TickScheduler, Tool,
};
