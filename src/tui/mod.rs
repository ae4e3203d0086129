//! Terminal UI for the brushing and sealant drills.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{Action, key_action, move_cursor, tooth_at, upper_count};
pub use ui::{ScreenLayout, screen_layout, tooth_cells, tooth_cells_in};

use std::io;
use std::time::Duration;

use anyhow::Result;
use brushy_core::{GameConfig, GameMode, Generation};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::ticker::TokioTicker;

/// Runs the game in the terminal until the user quits.
#[instrument(skip(config))]
pub async fn run_tui(config: GameConfig, mode: GameMode) -> Result<()> {
    info!("Starting brushy TUI");

    let (ticker, mut tick_rx) = TokioTicker::channel();
    let mut app = App::new(config, mode, ticker)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game_loop(&mut terminal, &mut app, &mut tick_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    if let Some(summary) = app.session().last_summary() {
        println!("{}", summary);
    }

    res
}

async fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rx: &mut mpsc::UnboundedReceiver<Generation>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            app.set_viewport(f.area());
            ui::draw(f, app);
        })?;

        while let Ok(generation) = tick_rx.try_recv() {
            app.on_tick(generation);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    debug!(?key, "Key pressed");
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
