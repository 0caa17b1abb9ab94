//! Score visualization
//!
//! Color banding, metric-specific score transforms, and the circle and badge
//! renderings of a score.

pub mod band;
pub mod rules;
pub mod visual;

pub use band::ScoreBand;
pub use rules::{MetricKind, ScoreRule, SCORE_RULES};
pub use visual::{circle_block_height, draw_score_badge, draw_score_circle};
