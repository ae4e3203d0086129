//! Star rating from a normalized performance ratio.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Ordinal star rating shown at the end of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Rating {
    /// Below 40%.
    OneStar,
    /// 40% and up.
    TwoStars,
    /// 60% and up.
    ThreeStars,
    /// 75% and up.
    FourStars,
    /// 90% and up.
    FiveStars,
}

impl Rating {
    /// Rates a ratio in `[0, 1]`. Out-of-range input is clamped.
    #[instrument]
    pub fn from_ratio(ratio: f64) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        if ratio >= 0.90 {
            Rating::FiveStars
        } else if ratio >= 0.75 {
            Rating::FourStars
        } else if ratio >= 0.60 {
            Rating::ThreeStars
        } else if ratio >= 0.40 {
            Rating::TwoStars
        } else {
            Rating::OneStar
        }
    }

    /// Rates a whole percentage, as reported in the session summary.
    #[instrument]
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            90.. => Rating::FiveStars,
            75..=89 => Rating::FourStars,
            60..=74 => Rating::ThreeStars,
            40..=59 => Rating::TwoStars,
            _ => Rating::OneStar,
        }
    }

    /// Number of stars.
    pub fn count(self) -> usize {
        match self {
            Rating::OneStar => 1,
            Rating::TwoStars => 2,
            Rating::ThreeStars => 3,
            Rating::FourStars => 4,
            Rating::FiveStars => 5,
        }
    }

    /// Star glyphs, one per star.
    pub fn stars(self) -> String {
        "★".repeat(self.count())
    }

    /// Short encouragement matching the rating.
    pub fn remark(self) -> &'static str {
        match self {
            Rating::FiveStars => "Perfect!",
            Rating::FourStars => "Very good!",
            Rating::ThreeStars => "Not bad",
            Rating::TwoStars => "Needs practice",
            Rating::OneStar => "Keep trying",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.stars(), self.remark())
    }
}
