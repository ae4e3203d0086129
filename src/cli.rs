//! Command-line interface for brushy.

use brushy_core::GameMode;
use clap::{Parser, Subcommand};

use crate::settings::DEFAULT_CONFIG_PATH;

/// Brushy - tooth-brushing and sealant drills
#[derive(Parser, Debug)]
#[command(name = "brushy")]
#[command(about = "Practice brushing angle and the dental sealant procedure", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Mode selected at launch (brushing or sealant)
        #[arg(short, long, default_value = "brushing")]
        mode: GameMode,

        /// Path to the TOML config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: std::path::PathBuf,
    },

    /// Print the effective configuration as TOML
    ShowConfig {
        /// Path to the TOML config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: std::path::PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_parses_mode() {
        let cli = Cli::try_parse_from(["brushy", "play", "--mode", "sealant"]).unwrap();
        match cli.command {
            Command::Play { mode, config } => {
                assert_eq!(mode, GameMode::Sealant);
                assert_eq!(config, std::path::PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            Command::ShowConfig { .. } => panic!("Expected play"),
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["brushy", "play", "--mode", "flossing"]).is_err());
    }
}
