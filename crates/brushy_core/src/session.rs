//! Session lifecycle: idle, running, ended.
//!
//! The [`SessionController`] owns all game state for one player. It routes
//! input to the scorer of the active mode, counts down once per tick and
//! produces a [`SessionSummary`] when the session ends.

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::brushing::{BrushingScorer, OrientationSample};
use crate::config::{ConfigError, GameConfig};
use crate::error::SessionError;
use crate::events::{EventSink, SessionEvent};
use crate::invariants::{CountdownBoundedInvariant, Invariant};
use crate::rating::Rating;
use crate::scheduler::{Generation, ManualScheduler, TickScheduler};
use crate::sealant::{ApplyOutcome, SealantStateMachine};
use crate::tool::Tool;

/// Length of one countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Which mini-game is being played.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Brush at the right angle.
    #[default]
    #[display("brushing")]
    Brushing,
    /// Apply the five sealant steps to every tooth.
    #[display("sealant")]
    Sealant,
}

impl GameMode {
    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::Brushing => GameMode::Sealant,
            GameMode::Sealant => GameMode::Brushing,
        }
    }
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SessionStatus {
    /// Waiting for `start`.
    #[display("idle")]
    Idle,
    /// Countdown active; input is scored.
    #[display("running")]
    Running,
    /// Finished; summary available.
    #[display("ended")]
    Ended,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum EndReason {
    /// The countdown reached zero.
    #[display("time is up")]
    TimeExpired,
    /// Every tooth was fully sealed.
    #[display("all teeth sealed")]
    SealantComplete,
    /// The player stopped early.
    #[display("stopped")]
    Stopped,
}

/// Input delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Brush pose sample (brushing mode).
    Orientation(OrientationSample),
    /// Tool selection (sealant mode).
    ArmTool(Tool),
    /// Tooth click (sealant mode).
    ApplyTool(usize),
}

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Mode that was played.
    mode: GameMode,
    /// Final score.
    score: u32,
    /// Accuracy (brushing) or completion (sealant) percentage.
    ratio_percent: u8,
    /// Star rating derived from the percentage.
    rating: Rating,
    /// What ended the session.
    reason: EndReason,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let metric = match self.mode {
            GameMode::Brushing => "accuracy",
            GameMode::Sealant => "completion",
        };
        write!(
            f,
            "Game over ({}): score {}, {} {}%, rating {}",
            self.reason, self.score, metric, self.ratio_percent, self.rating
        )
    }
}

/// Owns one player's session and both scorers.
///
/// Generic over the tick scheduler and the event sink so that the same
/// engine runs under tokio, in a terminal UI or in a plain unit test.
#[derive(Debug)]
pub struct SessionController<S = ManualScheduler, E = Vec<SessionEvent>> {
    config: GameConfig,
    mode: GameMode,
    status: SessionStatus,
    score: u32,
    seconds_remaining: u32,
    generation: Generation,
    brushing: BrushingScorer,
    sealant: SealantStateMachine,
    last_summary: Option<SessionSummary>,
    scheduler: S,
    sink: E,
}

impl<S: TickScheduler, E: EventSink> SessionController<S, E> {
    /// Creates an idle controller after validating the configuration.
    #[instrument(skip(config, scheduler, sink))]
    pub fn new(config: GameConfig, scheduler: S, sink: E) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            teeth = *config.tooth_count(),
            seconds = *config.session_duration_seconds(),
            "Creating session controller"
        );
        Ok(Self {
            mode: GameMode::default(),
            status: SessionStatus::Idle,
            score: 0,
            seconds_remaining: *config.session_duration_seconds(),
            generation: Generation::default(),
            brushing: BrushingScorer::new(),
            sealant: SealantStateMachine::new(&config),
            last_summary: None,
            config,
            scheduler,
            sink,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Mode of the current or last session.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the countdown.
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Generation of the live countdown.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Brushing scorer state.
    pub fn brushing(&self) -> &BrushingScorer {
        &self.brushing
    }

    /// Sealant procedure state.
    pub fn sealant(&self) -> &SealantStateMachine {
        &self.sealant
    }

    /// Summary of the most recent finished session.
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// The tick scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The event sink.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Mutable access to the event sink, for draining buffered events.
    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Starts a session in `mode`.
    ///
    /// Fails with [`SessionError::InvalidState`] while a session runs.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn start(&mut self, mode: GameMode) -> Result<(), SessionError> {
        if self.status == SessionStatus::Running {
            warn!("Start ignored, session already running");
            return Err(SessionError::InvalidState {
                action: "start",
                status: self.status,
            });
        }

        self.clear_state();
        self.mode = mode;
        self.status = SessionStatus::Running;
        self.generation = self.generation.next();
        self.scheduler.schedule(self.generation, TICK_PERIOD);

        info!(%mode, generation = %self.generation, "Session started");
        self.sink.emit(SessionEvent::SessionStarted {
            mode,
            seconds: self.seconds_remaining,
        });
        self.sink.emit(SessionEvent::ScoreChanged(self.score));
        Ok(())
    }

    /// Advances the countdown by one second.
    ///
    /// Ticks from an earlier generation, or arriving outside a running
    /// session, are dropped. Returns the summary when this tick ended the
    /// session.
    #[instrument(skip(self), fields(current = %self.generation))]
    pub fn tick(&mut self, generation: Generation) -> Option<SessionSummary> {
        if self.status != SessionStatus::Running || generation != self.generation {
            debug!(status = %self.status, "Stale tick dropped");
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.sink.emit(SessionEvent::TimeChanged(self.seconds_remaining));
        debug_assert!(
            <CountdownBoundedInvariant as Invariant<Self>>::holds(self),
            "{}",
            <CountdownBoundedInvariant as Invariant<Self>>::description()
        );

        if self.seconds_remaining == 0 {
            info!("Countdown expired");
            return Some(self.finish(EndReason::TimeExpired));
        }
        None
    }

    /// Ends the running session early.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn end(&mut self) -> Result<SessionSummary, SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::InvalidState {
                action: "end",
                status: self.status,
            });
        }
        Ok(self.finish(EndReason::Stopped))
    }

    /// Returns to idle with a fresh board.
    ///
    /// Fails with [`SessionError::InvalidState`] while a session runs.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Running {
            warn!("Reset ignored, session running");
            return Err(SessionError::InvalidState {
                action: "reset",
                status: self.status,
            });
        }

        self.scheduler.cancel();
        self.generation = self.generation.next();
        self.clear_state();
        self.status = SessionStatus::Idle;
        self.last_summary = None;

        info!("Session reset");
        self.sink.emit(SessionEvent::SessionReset);
        self.sink.emit(SessionEvent::ScoreChanged(self.score));
        self.sink.emit(SessionEvent::TimeChanged(self.seconds_remaining));
        Ok(())
    }

    /// Routes input to the active mode's scorer.
    ///
    /// Silently ignored unless a session is running, and when the input
    /// belongs to the other mode. Sealant rule violations are reported to
    /// the sink and returned; they never end the session.
    #[instrument(skip(self), fields(mode = %self.mode, status = %self.status))]
    pub fn forward(&mut self, event: InputEvent) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            debug!("Input ignored outside a running session");
            return Ok(());
        }

        match (self.mode, event) {
            (GameMode::Brushing, InputEvent::Orientation(sample)) => {
                if let Some(score) = self.brushing.on_orientation(&sample, &self.config) {
                    self.score = score;
                    self.sink.emit(SessionEvent::ScoreChanged(score));
                }
                Ok(())
            }
            (GameMode::Sealant, InputEvent::ArmTool(tool)) => {
                self.sealant.arm_tool(tool);
                self.sink.emit(SessionEvent::ToolArmed(tool));
                Ok(())
            }
            (GameMode::Sealant, InputEvent::ApplyTool(unit)) => self.apply_sealant(unit),
            (mode, event) => {
                debug!(%mode, ?event, "Input does not apply to this mode");
                Ok(())
            }
        }
    }

    /// Forwards an orientation sample.
    pub fn orientation_sample(&mut self, sample: OrientationSample) -> Result<(), SessionError> {
        self.forward(InputEvent::Orientation(sample))
    }

    /// Forwards a tool selection.
    pub fn arm_tool(&mut self, tool: Tool) -> Result<(), SessionError> {
        self.forward(InputEvent::ArmTool(tool))
    }

    /// Forwards a tooth click.
    pub fn apply_tool(&mut self, unit: usize) -> Result<(), SessionError> {
        self.forward(InputEvent::ApplyTool(unit))
    }

    fn apply_sealant(&mut self, unit: usize) -> Result<(), SessionError> {
        match self.sealant.apply_tool(unit) {
            Ok(ApplyOutcome::NoToolArmed) => Ok(()),
            Ok(ApplyOutcome::Applied {
                stage,
                score,
                all_complete,
            }) => {
                self.score = score;
                self.sink.emit(SessionEvent::UnitStageChanged { unit, stage });
                self.sink.emit(SessionEvent::ScoreChanged(score));

                if all_complete {
                    let final_score = self.sealant.finalize_score();
                    if final_score != self.score {
                        self.score = final_score;
                        self.sink.emit(SessionEvent::ScoreChanged(final_score));
                    }
                    info!("Every tooth sealed");
                    self.finish(EndReason::SealantComplete);
                }
                Ok(())
            }
            Err(err) => {
                match &err {
                    SessionError::SequenceViolation { unit, required, .. } => {
                        self.sink.emit(SessionEvent::SequenceViolation {
                            unit: *unit,
                            required_step: *required,
                        });
                    }
                    SessionError::OutOfRange { index, .. } => {
                        self.sink.emit(SessionEvent::UnitOutOfRange { unit: *index });
                    }
                    other => warn!(error = %other, "Sealant step failed"),
                }
                Err(err)
            }
        }
    }

    fn clear_state(&mut self) {
        self.score = 0;
        self.seconds_remaining = *self.config.session_duration_seconds();
        self.brushing.reset();
        self.sealant.reset();
    }

    fn finish(&mut self, reason: EndReason) -> SessionSummary {
        self.scheduler.cancel();
        self.generation = self.generation.next();
        self.status = SessionStatus::Ended;

        let summary = self.summarize(reason);
        info!(
            score = *summary.score(),
            percent = *summary.ratio_percent(),
            %reason,
            "Session ended"
        );
        self.last_summary = Some(summary.clone());
        self.sink.emit(SessionEvent::SessionEnded(summary.clone()));
        summary
    }

    fn summarize(&self, reason: EndReason) -> SessionSummary {
        let ratio_percent = match self.mode {
            GameMode::Brushing => BrushingScorer::accuracy_percent(self.score, &self.config),
            GameMode::Sealant => (self.sealant.completion_ratio() * 100.0).round() as u8,
        };
        SessionSummary {
            mode: self.mode,
            score: self.score,
            ratio_percent,
            rating: Rating::from_percent(ratio_percent),
            reason,
        }
    }
}
