//! Stateless rendering of the drills.

use brushy_core::{GameMode, SessionStatus, Stage, StageState, TickScheduler, Tool};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::input::upper_count;

/// Regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Mode, score, time.
    pub header: Rect,
    /// The two jaws.
    pub teeth: Rect,
    /// Angle readout or tool palette.
    pub detail: Rect,
    /// Last advisory message.
    pub status: Rect,
    /// Key help.
    pub help: Rect,
}

/// Splits the terminal into the screen regions.
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Teeth
            Constraint::Length(3), // Detail
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        teeth: chunks[1],
        detail: chunks[2],
        status: chunks[3],
        help: chunks[4],
    }
}

fn teeth_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" Upper jaw / lower jaw ")
}

/// Lays out tooth cells in two rows inside `area`.
pub fn tooth_cells(area: Rect, tooth_count: usize) -> Vec<Rect> {
    let upper = upper_count(tooth_count);
    let lower = tooth_count - upper;
    let row_height = (area.height / 2).max(1);

    let mut cells = Vec::with_capacity(tooth_count);
    for (row, count) in [(0u16, upper), (1u16, lower)] {
        if count == 0 {
            continue;
        }
        let divisor = u16::try_from(count).unwrap_or(u16::MAX).max(1);
        let width = (area.width / divisor).max(1);
        for i in 0..count {
            let column = u16::try_from(i).unwrap_or(u16::MAX);
            cells.push(Rect::new(
                area.x.saturating_add(width.saturating_mul(column)),
                area.y.saturating_add(row_height.saturating_mul(row)),
                width,
                row_height,
            ));
        }
    }
    cells
}

/// Tooth cells as drawn for a full-screen `viewport`.
pub fn tooth_cells_in(viewport: Rect, tooth_count: usize) -> Vec<Rect> {
    let teeth = screen_layout(viewport).teeth;
    tooth_cells(teeth_block().inner(teeth), tooth_count)
}

/// Renders the whole screen.
pub fn draw<S: TickScheduler>(frame: &mut Frame, app: &App<S>) {
    let layout = screen_layout(frame.area());

    draw_header(frame, layout.header, app);
    draw_teeth(frame, layout.teeth, app);
    match app.active_mode() {
        GameMode::Brushing => draw_angle(frame, layout.detail, app),
        GameMode::Sealant => draw_palette(frame, layout.detail, app),
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout.status);

    let help = Paragraph::new(help_text(app.active_mode()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, layout.help);

    if app.summary_visible() {
        draw_summary(frame, app);
    }
}

fn draw_header<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let session = app.session();
    let status_style = match session.status() {
        SessionStatus::Running => Style::default().fg(Color::Green),
        SessionStatus::Ended => Style::default().fg(Color::Magenta),
        SessionStatus::Idle => Style::default().fg(Color::DarkGray),
    };
    let line = Line::from(vec![
        Span::raw("Mode: "),
        Span::styled(
            app.active_mode().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Status: "),
        Span::styled(session.status().to_string(), status_style),
        Span::raw("   Score: "),
        Span::styled(
            session.score().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Time: "),
        Span::raw(format!("{}s", session.seconds_remaining())),
    ]);
    let header = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Brushy ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(header, area);
}

fn draw_teeth<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let block = teeth_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let session = app.session();
    let sealant = app.active_mode() == GameMode::Sealant;
    let cells = tooth_cells(inner, session.sealant().units().len());

    for (index, (cell, state)) in cells.iter().zip(session.sealant().units()).enumerate() {
        let mut style = if sealant {
            stage_style(state)
        } else {
            Style::default().fg(Color::White)
        };
        if sealant && index == app.cursor() {
            style = style.bg(Color::White).fg(Color::Black);
        }
        let progress = if sealant {
            progress_bar(state)
        } else {
            "▀▀".to_string()
        };
        let text = vec![Line::from(format!("{}", index + 1)), Line::from(progress)];
        frame.render_widget(
            Paragraph::new(text).style(style).alignment(Alignment::Center),
            *cell,
        );
    }

    if !sealant
        && let Some((x, y)) = app.brush_cell()
        && x >= inner.x
        && x < inner.x + inner.width
        && y >= inner.y
        && y < inner.y + inner.height
    {
        let brush = Paragraph::new("╱").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(brush, Rect::new(x, y, 1, 1));
    }
}

fn stage_style(state: &StageState) -> Style {
    let color = match state.latest() {
        None => Color::White,
        Some(Stage::Cleaned) => Color::Cyan,
        Some(Stage::Etched) => Color::Yellow,
        Some(Stage::Bonded) => Color::Magenta,
        Some(Stage::Sealed) => Color::Blue,
        Some(Stage::Cured) => Color::Green,
    };
    Style::default().fg(color)
}

fn progress_bar(state: &StageState) -> String {
    Stage::ALL
        .iter()
        .map(|stage| if state.is_done(*stage) { '■' } else { '□' })
        .collect()
}

fn draw_angle<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let config = app.session().config();
    let (reading, style) = match app.last_angle() {
        Some(angle) if (angle - config.target_angle()).abs() <= *config.angle_threshold() => (
            format!("Angle {:.0}°  on target", angle),
            Style::default().fg(Color::Green),
        ),
        Some(angle) => (
            format!("Angle {:.0}°", angle),
            Style::default().fg(Color::Red),
        ),
        None => ("Angle --".to_string(), Style::default().fg(Color::DarkGray)),
    };
    let line = Line::from(vec![
        Span::styled(reading, style),
        Span::raw(format!(
            "   target {:.0}° ± {:.0}°",
            config.target_angle(),
            config.angle_threshold()
        )),
    ]);
    let detail = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Brush "));
    frame.render_widget(detail, area);
}

fn draw_palette<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let armed = app.session().sealant().armed();
    let mut spans = Vec::new();
    for tool in Tool::ALL {
        let style = if armed == Some(tool) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} {} ", tool.step(), tool), style));
        spans.push(Span::raw(" "));
    }
    let palette = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Tools "));
    frame.render_widget(palette, area);
}

fn draw_summary<S: TickScheduler>(frame: &mut Frame, app: &App<S>) {
    let Some(summary) = app.session().last_summary() else {
        return;
    };
    let metric = match summary.mode() {
        GameMode::Brushing => "Brushing accuracy",
        GameMode::Sealant => "Teeth sealed",
    };
    let area = center_rect(frame.area(), 44, 9);
    let text = vec![
        Line::from(Span::styled(
            "Game over!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final score: {}", summary.score())),
        Line::from(format!("{}: {}%", metric, summary.ratio_percent())),
        Line::from(format!("Rating: {}", summary.rating())),
        Line::from(format!("({})", summary.reason())),
        Line::from(""),
        Line::from("s: play again   r: reset   Esc: quit"),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Summary ")),
        area,
    );
}

fn help_text(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Brushing => {
            "s start  x stop  r reset  m mode  | move the mouse or q/e/z/c/arrows to brush | Esc quit"
        }
        GameMode::Sealant => {
            "s start  x stop  r reset  m mode  | 1-5 arm tool, arrows + Enter or click a tooth | Esc quit"
        }
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
