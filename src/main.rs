//! Brushy - command-line entry point.

#![warn(missing_docs)]

use anyhow::Result;
use brushy::cli::{Cli, Command};
use brushy::{GameMode, load_config, render_config, run_tui};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { mode, config } => play(mode, config).await,
        Command::ShowConfig { config } => show_config(config),
    }
}

/// Run the terminal game
async fn play(mode: GameMode, config: PathBuf) -> Result<()> {
    // Log to file to avoid interfering with the TUI
    let log_file = std::fs::File::create("brushy.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,brushy=debug,brushy_core=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let config = load_config(&config)?;
    info!(%mode, "Launching game");
    run_tui(config, mode).await
}

/// Print the effective configuration
fn show_config(config: PathBuf) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&config)?;
    print!("{}", render_config(&config)?);
    Ok(())
}
