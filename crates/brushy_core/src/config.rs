//! Static game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::tool::Stage;

/// Tunable constants for both game modes.
///
/// Every field has a default, so a partial TOML table is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Number of teeth tracked (one unit per tooth).
    tooth_count: usize,
    /// Tolerance band around the target angle, in degrees.
    angle_threshold: f64,
    /// Ideal brushing angle, in degrees.
    target_angle: f64,
    /// Points awarded per qualifying orientation sample.
    score_per_tooth: u32,
    /// Countdown length.
    session_duration_seconds: u32,
    /// Ordered sealant stages per tooth.
    sealant_step_count: usize,
    /// Points awarded per successful sealant step.
    step_reward: u32,
    /// Points per fully cured tooth used for the final sealant score.
    per_unit_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tooth_count: 16,
            angle_threshold: 10.0,
            target_angle: 45.0,
            score_per_tooth: 10,
            session_duration_seconds: 120,
            sealant_step_count: Stage::COUNT,
            step_reward: 10,
            per_unit_bonus: 50,
        }
    }
}

impl GameConfig {
    /// Largest supported number of teeth.
    pub const MAX_TOOTH_COUNT: usize = u16::MAX as usize;

    /// Theoretical brushing maximum: two surfaces per tooth.
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.tooth_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.score_per_tooth)
            .saturating_mul(2)
    }

    /// Checks the configuration for values the engine cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tooth_count == 0 {
            warn!("Rejected config with zero teeth");
            return Err(ConfigError::new("tooth_count must be at least 1"));
        }
        if self.tooth_count > Self::MAX_TOOTH_COUNT {
            warn!(tooth_count = self.tooth_count, "Rejected config with too many teeth");
            return Err(ConfigError::new(format!(
                "tooth_count must be at most {}, got {}",
                Self::MAX_TOOTH_COUNT,
                self.tooth_count
            )));
        }
        if self.session_duration_seconds == 0 {
            warn!("Rejected config with zero-length session");
            return Err(ConfigError::new(
                "session_duration_seconds must be at least 1",
            ));
        }
        if !self.angle_threshold.is_finite() || self.angle_threshold < 0.0 {
            return Err(ConfigError::new(format!(
                "angle_threshold must be a non-negative number, got {}",
                self.angle_threshold
            )));
        }
        if !self.target_angle.is_finite() {
            return Err(ConfigError::new("target_angle must be finite"));
        }
        if self.sealant_step_count != Stage::COUNT {
            return Err(ConfigError::new(format!(
                "sealant_step_count must be {}, got {}",
                Stage::COUNT,
                self.sealant_step_count
            )));
        }
        debug!(tooth_count = self.tooth_count, "Config validated");
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
