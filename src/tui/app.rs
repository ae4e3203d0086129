//! Application state and logic.

use brushy_core::{
    ConfigError, GameConfig, GameMode, Generation, OrientationSample, SessionController,
    SessionError, SessionEvent, SessionStatus, TickScheduler, Tool,
};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, instrument};

use super::input::{Action, key_action, move_cursor, tooth_at};
use super::ui::{screen_layout, tooth_cells_in};
use crate::ticker::TokioTicker;

/// Terminal rows are roughly twice as tall as columns are wide.
const ROW_ASPECT: f64 = 2.0;

/// Main application state.
pub struct App<S = TokioTicker> {
    session: SessionController<S, Vec<SessionEvent>>,
    selected_mode: GameMode,
    cursor: usize,
    brush: Option<(u16, u16)>,
    last_angle: Option<f64>,
    viewport: Rect,
    status_message: String,
    summary_visible: bool,
    should_quit: bool,
}

impl<S: TickScheduler> App<S> {
    /// Creates the application with `mode` preselected.
    pub fn new(config: GameConfig, mode: GameMode, scheduler: S) -> Result<Self, ConfigError> {
        let session = SessionController::new(config, scheduler, Vec::new())?;
        Ok(Self {
            session,
            selected_mode: mode,
            cursor: 0,
            brush: None,
            last_angle: None,
            viewport: Rect::default(),
            status_message: format!("Mode: {}. Press s to start.", mode),
            summary_visible: false,
            should_quit: false,
        })
    }

    /// The session being played.
    pub fn session(&self) -> &SessionController<S, Vec<SessionEvent>> {
        &self.session
    }

    /// Mode the next `start` will use.
    pub fn selected_mode(&self) -> GameMode {
        self.selected_mode
    }

    /// Mode whose controls are live: the running session's, otherwise the selection.
    pub fn active_mode(&self) -> GameMode {
        if self.session.status() == SessionStatus::Running {
            self.session.mode()
        } else {
            self.selected_mode
        }
    }

    /// Tooth under the sealant cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal cell of the brush tip, once it has moved.
    pub fn brush_cell(&self) -> Option<(u16, u16)> {
        self.brush
    }

    /// Angle of the most recent stroke.
    pub fn last_angle(&self) -> Option<f64> {
        self.last_angle
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the end-of-session popup is shown.
    pub fn summary_visible(&self) -> bool {
        self.summary_visible
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records the terminal size used for mouse hit-testing.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Delivers a countdown tick.
    pub fn on_tick(&mut self, generation: Generation) {
        self.session.tick(generation);
        self.drain_events();
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = key_action(key, self.active_mode());
        self.apply(action);
    }

    /// Handles mouse movement and clicks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match (self.active_mode(), mouse.kind) {
            (GameMode::Brushing, MouseEventKind::Moved | MouseEventKind::Drag(_)) => {
                self.pointer_moved(mouse.column, mouse.row)
            }
            (GameMode::Sealant, MouseEventKind::Down(MouseButton::Left)) => {
                let cells = tooth_cells_in(self.viewport, self.session.sealant().units().len());
                if let Some(unit) = tooth_at(&cells, mouse.column, mouse.row) {
                    self.cursor = unit;
                    let result = self.session.apply_tool(unit);
                    self.report(result);
                }
            }
            _ => {}
        }
        self.drain_events();
    }

    /// Performs one user action.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Start => {
                let result = self.session.start(self.selected_mode);
                if result.is_ok() {
                    self.summary_visible = false;
                    self.cursor = 0;
                    self.last_angle = None;
                    self.brush = None;
                }
                self.report(result);
            }
            Action::Reset => {
                let result = self.session.reset();
                if result.is_ok() {
                    self.summary_visible = false;
                    self.cursor = 0;
                    self.last_angle = None;
                }
                self.report(result);
            }
            Action::Stop => {
                let result = self.session.end().map(|_| ());
                self.report(result);
            }
            Action::ToggleMode => {
                if self.session.status() == SessionStatus::Running {
                    self.status_message = "Stop the session before switching modes".to_string();
                } else {
                    self.selected_mode = self.selected_mode.toggle();
                    self.status_message =
                        format!("Mode: {}. Press s to start.", self.selected_mode);
                }
            }
            Action::Quit => self.should_quit = true,
            Action::Stroke { dx, dy } => self.keyboard_stroke(dx, dy),
            Action::Arm(tool) => {
                let result = self.session.arm_tool(tool);
                self.report(result);
            }
            Action::Cursor(code) => {
                self.cursor = move_cursor(self.cursor, code, self.session.sealant().units().len());
            }
            Action::ApplyAtCursor => {
                let result = self.session.apply_tool(self.cursor);
                self.report(result);
            }
            Action::Nothing => {}
        }
        self.drain_events();
    }

    fn keyboard_stroke(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.brush.unwrap_or_else(|| self.brush_home());
        let nx = (x as f64 + dx).max(0.0) as u16;
        let ny = (y as f64 + dy).max(0.0) as u16;
        self.brush = Some((nx, ny));
        self.stroke(nx, ny, dx, dy);
    }

    fn pointer_moved(&mut self, column: u16, row: u16) {
        let previous = self.brush.replace((column, row));
        let Some((px, py)) = previous else {
            return;
        };
        let dx = column as f64 - px as f64;
        let dy = (row as f64 - py as f64) * ROW_ASPECT;
        if dx != 0.0 || dy != 0.0 {
            self.stroke(column, row, dx, dy);
        }
    }

    fn stroke(&mut self, column: u16, row: u16, dx: f64, dy: f64) {
        let sample = OrientationSample::from_motion(column as f64, row as f64, dx, dy);
        if sample.angle_degrees().is_some() {
            self.last_angle = *sample.angle_degrees();
        }
        let result = self.session.orientation_sample(sample);
        self.report(result);
    }

    fn brush_home(&self) -> (u16, u16) {
        let teeth = screen_layout(self.viewport).teeth;
        (teeth.x + teeth.width / 2, teeth.y + teeth.height / 2)
    }

    fn report(&mut self, result: Result<(), SessionError>) {
        match result {
            Ok(()) => {}
            // Reported through the event stream.
            Err(SessionError::SequenceViolation { .. } | SessionError::OutOfRange { .. }) => {}
            Err(err) => {
                debug!(error = %err, "Action rejected");
                self.status_message = err.to_string();
            }
        }
    }

    fn drain_events(&mut self) {
        let events: Vec<SessionEvent> = self.session.sink_mut().drain(..).collect();
        for event in events {
            debug!(?event, "Handling session event");
            match event {
                SessionEvent::SessionStarted { mode, seconds } => {
                    self.status_message = match mode {
                        GameMode::Brushing => format!(
                            "Brush at {:.0}° for {}s!",
                            self.session.config().target_angle(),
                            seconds
                        ),
                        GameMode::Sealant => format!(
                            "Seal every tooth in {}s: clean, etch, bond, seal, cure",
                            seconds
                        ),
                    };
                }
                SessionEvent::ToolArmed(tool) => {
                    self.status_message = format!("{} armed (step {})", tool, tool.step());
                }
                SessionEvent::UnitStageChanged { unit, stage } => {
                    self.status_message = format!("Tooth {} {}", unit + 1, stage);
                }
                SessionEvent::SequenceViolation {
                    unit,
                    required_step,
                } => {
                    self.status_message = match Tool::from_step(required_step) {
                        Some(next) => format!(
                            "Tooth {}: complete prior steps first (next: {})",
                            unit + 1,
                            next
                        ),
                        None => format!("Tooth {} is already sealed", unit + 1),
                    };
                }
                SessionEvent::UnitOutOfRange { unit } => {
                    self.status_message = format!("There is no tooth {}", unit + 1);
                }
                SessionEvent::SessionEnded(summary) => {
                    self.status_message = summary.to_string();
                    self.summary_visible = true;
                }
                SessionEvent::SessionReset => {
                    self.status_message =
                        format!("Mode: {}. Press s to start.", self.selected_mode);
                }
                SessionEvent::ScoreChanged(_) | SessionEvent::TimeChanged(_) => {}
            }
        }
    }
}
