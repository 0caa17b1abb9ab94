//! Metric-specific score transforms
//!
//! Several metrics are not scores themselves. Each one maps its raw value to
//! a 0-100 score through exactly one rule in [`SCORE_RULES`]; changing a
//! threshold here changes it everywhere the metric is drawn.

use serde::Serialize;

/// Score awarded when a threshold metric is within its healthy bounds
pub const HEALTHY_SCORE: i32 = 80;
/// Score awarded when a threshold metric is outside its healthy bounds
pub const UNHEALTHY_SCORE: i32 = 50;

/// Metrics that need a transform before banding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TimeInRange,
    TimeInTightRange,
    TimeBelowRange,
    TimeAboveRange,
    CoefficientOfVariation,
    MeanGlucose,
    Gmi,
    PostMealSuccess,
    PostMealPeak,
    SleepDuration,
    SleepEfficiency,
    AverageSteps,
    ActiveMinutes,
    /// Days a step goal was reached, as a share of the reporting period
    GoalDays,
}

/// How a raw value becomes a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScoreRule {
    /// The raw percentage is the score
    Direct,
    /// Lower is better: 100 - raw
    Inverted,
    /// Fixed score inside `[min, max]`, another outside
    Within { min: f64, max: f64, pass: i32, fail: i32 },
    /// Three fixed scores split at two descending thresholds
    Tiered { good_at: f64, warn_at: f64, good: i32, warn: i32, poor: i32 },
    /// Percent of a caller-supplied target, capped at 100
    PercentOfTarget,
}

/// The single declarative table of metric transforms
pub const SCORE_RULES: &[(MetricKind, ScoreRule)] = &[
    (MetricKind::TimeInRange, ScoreRule::Direct),
    (MetricKind::TimeInTightRange, ScoreRule::Direct),
    (MetricKind::TimeBelowRange, ScoreRule::Inverted),
    (MetricKind::TimeAboveRange, ScoreRule::Inverted),
    (
        MetricKind::CoefficientOfVariation,
        ScoreRule::Within { min: 0.0, max: 36.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (
        MetricKind::MeanGlucose,
        ScoreRule::Within { min: 3.9, max: 10.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (
        MetricKind::Gmi,
        ScoreRule::Within { min: 0.0, max: 7.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (
        MetricKind::PostMealSuccess,
        ScoreRule::Tiered { good_at: 70.0, warn_at: 50.0, good: 80, warn: 60, poor: 40 },
    ),
    (
        MetricKind::PostMealPeak,
        ScoreRule::Within { min: 0.0, max: 10.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (
        MetricKind::SleepDuration,
        ScoreRule::Within { min: 7.0, max: 9.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (
        MetricKind::SleepEfficiency,
        ScoreRule::Within { min: 85.0, max: 100.0, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (MetricKind::AverageSteps, ScoreRule::PercentOfTarget),
    (
        MetricKind::ActiveMinutes,
        ScoreRule::Within { min: 30.0, max: f64::INFINITY, pass: HEALTHY_SCORE, fail: UNHEALTHY_SCORE },
    ),
    (MetricKind::GoalDays, ScoreRule::PercentOfTarget),
];

impl MetricKind {
    pub fn rule(&self) -> ScoreRule {
        SCORE_RULES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, rule)| *rule)
            .unwrap_or(ScoreRule::Direct)
    }

    /// Score for a raw value. `target` is only read by percent-of-target rules.
    pub fn score(&self, raw: f64, target: Option<f64>) -> Option<i32> {
        self.rule().apply(raw, target)
    }
}

impl ScoreRule {
    /// Apply the rule; non-finite input or a missing/zero target yields no score
    pub fn apply(&self, raw: f64, target: Option<f64>) -> Option<i32> {
        if !raw.is_finite() {
            return None;
        }
        match *self {
            ScoreRule::Direct => Some(raw.round() as i32),
            ScoreRule::Inverted => Some((100.0 - raw).round() as i32),
            ScoreRule::Within { min, max, pass, fail } => {
                Some(if raw >= min && raw <= max { pass } else { fail })
            }
            ScoreRule::Tiered { good_at, warn_at, good, warn, poor } => Some(if raw >= good_at {
                good
            } else if raw >= warn_at {
                warn
            } else {
                poor
            }),
            ScoreRule::PercentOfTarget => {
                let goal = target.filter(|t| t.is_finite() && *t > 0.0)?;
                Some(((raw / goal) * 100.0).round().clamp(0.0, 100.0) as i32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreBand;

    #[test]
    fn test_every_kind_has_a_rule() {
        let kinds = [
            MetricKind::TimeInRange,
            MetricKind::TimeInTightRange,
            MetricKind::TimeBelowRange,
            MetricKind::TimeAboveRange,
            MetricKind::CoefficientOfVariation,
            MetricKind::MeanGlucose,
            MetricKind::Gmi,
            MetricKind::PostMealSuccess,
            MetricKind::PostMealPeak,
            MetricKind::SleepDuration,
            MetricKind::SleepEfficiency,
            MetricKind::AverageSteps,
            MetricKind::ActiveMinutes,
            MetricKind::GoalDays,
        ];
        for kind in kinds {
            assert!(SCORE_RULES.iter().any(|(k, _)| *k == kind), "{:?}", kind);
        }
    }

    #[test]
    fn test_below_and_above_range_invert() {
        assert_eq!(MetricKind::TimeBelowRange.score(3.0, None), Some(97));
        assert_eq!(MetricKind::TimeAboveRange.score(45.0, None), Some(55));
        assert_eq!(ScoreBand::of_optional(MetricKind::TimeAboveRange.score(45.0, None)), ScoreBand::Critical);
    }

    #[test]
    fn test_cv_is_binary() {
        assert_eq!(MetricKind::CoefficientOfVariation.score(36.0, None), Some(80));
        assert_eq!(MetricKind::CoefficientOfVariation.score(36.1, None), Some(50));
    }

    #[test]
    fn test_sleep_duration_healthy_range() {
        assert_eq!(MetricKind::SleepDuration.score(6.9, None), Some(50));
        assert_eq!(MetricKind::SleepDuration.score(7.0, None), Some(80));
        assert_eq!(MetricKind::SleepDuration.score(9.0, None), Some(80));
        assert_eq!(MetricKind::SleepDuration.score(9.5, None), Some(50));
    }

    #[test]
    fn test_post_meal_success_tiers() {
        assert_eq!(MetricKind::PostMealSuccess.score(70.0, None), Some(80));
        assert_eq!(MetricKind::PostMealSuccess.score(69.9, None), Some(60));
        assert_eq!(MetricKind::PostMealSuccess.score(50.0, None), Some(60));
        assert_eq!(MetricKind::PostMealSuccess.score(49.0, None), Some(40));
    }

    #[test]
    fn test_steps_percent_of_goal() {
        assert_eq!(MetricKind::AverageSteps.score(6000.0, Some(8000.0)), Some(75));
        assert_eq!(MetricKind::AverageSteps.score(12000.0, Some(8000.0)), Some(100));
        assert_eq!(MetricKind::AverageSteps.score(6000.0, None), None);
        assert_eq!(MetricKind::AverageSteps.score(6000.0, Some(0.0)), None);
    }

    #[test]
    fn test_non_finite_raw_has_no_score() {
        assert_eq!(MetricKind::TimeInRange.score(f64::NAN, None), None);
    }
}
