//! Brushing-accuracy scoring from pointer orientation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::config::GameConfig;

/// One pointer event reduced to a brush pose.
///
/// The angle is absent when the input cannot determine one, such as a
/// single-finger touch or a pointer that did not move.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Horizontal position.
    x: f64,
    /// Vertical position (grows downward).
    y: f64,
    /// Brush angle in degrees, in `(-180, 180]`.
    angle_degrees: Option<f64>,
}

impl OrientationSample {
    /// Creates a sample from an already-known pose.
    pub fn new(x: f64, y: f64, angle_degrees: Option<f64>) -> Self {
        Self {
            x,
            y,
            angle_degrees,
        }
    }

    /// Derives the angle from the pointer's movement vector.
    #[instrument]
    pub fn from_motion(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        let angle = if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(dy.atan2(dx).to_degrees())
        };
        Self::new(x, y, angle)
    }

    /// Derives the pose from touch points.
    ///
    /// The first touch gives the position. With a second touch the angle
    /// points from the first touch toward it.
    #[instrument]
    pub fn from_touches(points: &[(f64, f64)]) -> Option<Self> {
        let (x, y) = *points.first()?;
        let angle = points
            .get(1)
            .map(|(x2, y2)| (y2 - y).atan2(x2 - x).to_degrees());
        Some(Self::new(x, y, angle))
    }
}

/// Accumulates brushing score.
///
/// Every qualifying sample scores; there is no debouncing and no per-tooth
/// attribution, so the score grows with event frequency. The reported
/// accuracy is capped at 100%.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushingScorer {
    score: u32,
    qualifying_samples: u32,
}

impl BrushingScorer {
    /// Creates a scorer with zero score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of samples that were within tolerance.
    pub fn qualifying_samples(&self) -> u32 {
        self.qualifying_samples
    }

    /// Clears the score for a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the sample's angle is within tolerance of the target.
    ///
    /// A sample without an angle never qualifies.
    pub fn is_on_target(sample: &OrientationSample, config: &GameConfig) -> bool {
        match sample.angle_degrees {
            Some(angle) => (angle - config.target_angle()).abs() <= *config.angle_threshold(),
            None => false,
        }
    }

    /// Scores one sample. Returns the new score when it changed.
    #[instrument(skip(self, config))]
    pub fn on_orientation(
        &mut self,
        sample: &OrientationSample,
        config: &GameConfig,
    ) -> Option<u32> {
        if sample.angle_degrees.is_none() {
            trace!("Sample has no angle, skipping check");
            return None;
        }
        if !Self::is_on_target(sample, config) {
            trace!("Sample outside tolerance");
            return None;
        }
        self.score = self.score.saturating_add(*config.score_per_tooth());
        self.qualifying_samples = self.qualifying_samples.saturating_add(1);
        debug!(score = self.score, "Brushing sample scored");
        Some(self.score)
    }

    /// Accuracy percentage against the theoretical maximum, capped at 100.
    pub fn accuracy_percent(score: u32, config: &GameConfig) -> u8 {
        let max = config.max_score();
        if max == 0 {
            return 0;
        }
        let percent = (f64::from(score) / f64::from(max) * 100.0).round();
        percent.min(100.0) as u8
    }
}
