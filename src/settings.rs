//! Loading the game configuration from TOML.

use std::path::Path;

use brushy_core::{ConfigError, GameConfig};
use tracing::{debug, info, instrument};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "brushy.toml";

/// Loads and validates the configuration at `path`.
///
/// A missing file yields the defaults. Unreadable, unparsable or invalid
/// files are errors.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Ok(GameConfig::default());
    }

    debug!("Loading config from file");
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

    let config: GameConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

    config.validate()?;
    info!(
        teeth = *config.tooth_count(),
        seconds = *config.session_duration_seconds(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Renders a configuration as TOML.
#[instrument(skip(config))]
pub fn render_config(config: &GameConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config)
        .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
}
