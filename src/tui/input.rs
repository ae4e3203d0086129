//! Keyboard and mouse mapping.

use brushy_core::{GameMode, Tool};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start a session in the selected mode.
    Start,
    /// Return to idle.
    Reset,
    /// End the running session early.
    Stop,
    /// Switch between brushing and sealant.
    ToggleMode,
    /// Leave the application.
    Quit,
    /// Move the brush by one step (brushing).
    Stroke {
        /// Horizontal movement.
        dx: f64,
        /// Vertical movement, downward positive.
        dy: f64,
    },
    /// Arm a tool (sealant).
    Arm(Tool),
    /// Move the tooth cursor (sealant).
    Cursor(KeyCode),
    /// Apply the armed tool to the tooth under the cursor (sealant).
    ApplyAtCursor,
    /// Unbound key.
    Nothing,
}

/// Maps a key press to an action for the given mode.
pub fn key_action(key: KeyEvent, mode: GameMode) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Char('s') => return Action::Start,
        KeyCode::Char('r') => return Action::Reset,
        KeyCode::Char('x') => return Action::Stop,
        KeyCode::Char('m') => return Action::ToggleMode,
        _ => {}
    }

    match mode {
        GameMode::Brushing => stroke_for(key.code),
        GameMode::Sealant => match key.code {
            KeyCode::Char(c @ '1'..='5') => c
                .to_digit(10)
                .and_then(|d| Tool::from_step(d as u8))
                .map_or(Action::Nothing, Action::Arm),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                Action::Cursor(key.code)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::ApplyAtCursor,
            _ => Action::Nothing,
        },
    }
}

fn stroke_for(code: KeyCode) -> Action {
    let (dx, dy) = match code {
        KeyCode::Left => (-1.0, 0.0),
        KeyCode::Right => (1.0, 0.0),
        KeyCode::Up => (0.0, -1.0),
        KeyCode::Down => (0.0, 1.0),
        KeyCode::Char('q') => (-1.0, -1.0),
        KeyCode::Char('e') => (1.0, -1.0),
        KeyCode::Char('z') => (-1.0, 1.0),
        KeyCode::Char('c') => (1.0, 1.0),
        _ => return Action::Nothing,
    };
    Action::Stroke { dx, dy }
}

/// Number of teeth drawn in the upper jaw.
pub fn upper_count(tooth_count: usize) -> usize {
    tooth_count.div_ceil(2)
}

/// Moves the tooth cursor across the two jaws.
///
/// Left/right stay within a jaw; up/down switch jaws at the same column.
pub fn move_cursor(cursor: usize, key: KeyCode, tooth_count: usize) -> usize {
    if tooth_count == 0 {
        return 0;
    }
    let upper = upper_count(tooth_count);
    let (in_upper, column) = if cursor < upper {
        (true, cursor)
    } else {
        (false, cursor - upper)
    };
    let row_len = if in_upper { upper } else { tooth_count - upper };
    let row_start = if in_upper { 0 } else { upper };

    match key {
        KeyCode::Left => row_start + column.saturating_sub(1),
        KeyCode::Right => row_start + (column + 1).min(row_len - 1),
        KeyCode::Down if in_upper && tooth_count > upper => {
            upper + column.min(tooth_count - upper - 1)
        }
        KeyCode::Up if !in_upper => column.min(upper - 1),
        _ => cursor,
    }
}

/// Finds the tooth whose cell contains the given terminal cell.
pub fn tooth_at(cells: &[Rect], column: u16, row: u16) -> Option<usize> {
    cells.iter().position(|cell| {
        column >= cell.x
            && column < cell.x.saturating_add(cell.width)
            && row >= cell.y
            && row < cell.y.saturating_add(cell.height)
    })
}
