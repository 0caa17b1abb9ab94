//! Score color banding
//!
//! One threshold table for every place a score turns into a color.

use serde::Serialize;

use crate::render::{Palette, Rgb};

pub const GOOD_MIN: i32 = 80;
pub const WARNING_MIN: i32 = 60;
pub const SCORE_MAX: i32 = 100;

/// Color band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Warning,
    Critical,
    /// No score available
    Neutral,
}

impl ScoreBand {
    /// Band for a score; values outside 0-100 are critical
    pub fn of(score: i32) -> Self {
        match score {
            GOOD_MIN..=SCORE_MAX => ScoreBand::Good,
            WARNING_MIN..=79 => ScoreBand::Warning,
            _ => ScoreBand::Critical,
        }
    }

    /// Band for an optional score; absent scores are neutral
    pub fn of_optional(score: Option<i32>) -> Self {
        score.map(Self::of).unwrap_or(ScoreBand::Neutral)
    }

    /// Fill color for circles and the base tint for badges
    pub fn fill(&self, palette: &Palette) -> Rgb {
        match self {
            ScoreBand::Good => palette.good,
            ScoreBand::Warning => palette.warning,
            ScoreBand::Critical => palette.critical,
            ScoreBand::Neutral => palette.neutral_fill,
        }
    }

    /// Text color drawn on top of [`ScoreBand::fill`]
    pub fn text_on_fill(&self, palette: &Palette) -> Rgb {
        match self {
            ScoreBand::Neutral => palette.neutral_text,
            _ => palette.score_text,
        }
    }

    /// Accent used for values drawn on the white page (badge values, list dots)
    pub fn accent(&self, palette: &Palette) -> Rgb {
        match self {
            ScoreBand::Neutral => palette.neutral_text,
            other => other.fill(palette),
        }
    }
}
