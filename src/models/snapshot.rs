//! Report snapshot model
//!
//! The immutable input of one render. Everything except the nickname and the
//! date range is optional: an absent sub-report is a normal case that renders
//! a placeholder, never an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metric::ScoredMetric;

/// Inclusive reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().abs() + 1
    }
}

/// Overall wellness score and its components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessScore {
    pub overall: Option<i32>,
    /// Secondary scores placed beside the overall score, in display order
    #[serde(default)]
    pub components: Vec<ScoredMetric>,
}

/// Glucose statistics for the period (percentages are 0-100)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlucoseMetrics {
    pub time_in_range: Option<f64>,
    pub time_in_tight_range: Option<f64>,
    pub time_below_range: Option<f64>,
    pub time_above_range: Option<f64>,
    pub coefficient_of_variation: Option<f64>,
    /// mmol/L
    pub mean_glucose: Option<f64>,
    /// Glucose management indicator, %
    pub gmi: Option<f64>,
}

/// Ambulatory glucose profile: five percentile series over hour buckets.
///
/// All series are expected to have the same length as `hours` and to be
/// ordered p10 <= p25 <= p50 <= p75 <= p90. Neither is enforced; the chart
/// degrades instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgpSeries {
    pub hours: Vec<i32>,
    pub p10: Vec<f64>,
    pub p25: Vec<f64>,
    pub p50: Vec<f64>,
    pub p75: Vec<f64>,
    pub p90: Vec<f64>,
}

impl AgpSeries {
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// True when every percentile series matches the hour count and there
    /// are at least two points to connect
    pub fn is_drawable(&self) -> bool {
        let n = self.hours.len();
        n >= 2
            && [&self.p10, &self.p25, &self.p50, &self.p75, &self.p90]
                .iter()
                .all(|s| s.len() == n)
    }
}

/// Macro-nutrient split; normalized by its own sum when drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroDistribution {
    pub carbohydrate: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroDistribution {
    pub fn new(carbohydrate: f64, protein: f64, fat: f64) -> Self {
        Self { carbohydrate, protein, fat }
    }
}

/// Energy intake per day segment; normalized by its own sum when drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyDistribution {
    pub morning: f64,
    pub midday: f64,
    pub evening: f64,
    pub night: f64,
}

impl EnergyDistribution {
    pub fn new(morning: f64, midday: f64, evening: f64, night: f64) -> Self {
        Self { morning, midday, evening, night }
    }
}

/// Nutrition sub-report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionMetrics {
    pub meal_score: Option<i32>,
    /// Share of meals with an acceptable post-meal response, %
    pub post_meal_success_rate: Option<f64>,
    /// Average post-meal glucose peak, mmol/L
    pub post_meal_peak: Option<f64>,
    pub macros: Option<MacroDistribution>,
    pub energy: Option<EnergyDistribution>,
}

/// Activity sub-report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub average_steps: Option<f64>,
    pub step_goal: Option<f64>,
    pub active_minutes: Option<f64>,
    /// Step threshold -> number of days that reached it
    #[serde(default)]
    pub goal_achievement: BTreeMap<u32, u32>,
}

/// Sleep sub-report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepMetrics {
    pub score: Option<i32>,
    pub average_duration_hours: Option<f64>,
    /// %
    pub efficiency: Option<f64>,
    /// Preformatted, e.g. "23:15"
    pub average_bedtime: Option<String>,
}

/// Immutable input for one report render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub nickname: String,
    pub period: DateRange,
    #[serde(default)]
    pub wellness: WellnessScore,
    pub glucose: Option<GlucoseMetrics>,
    pub agp: Option<AgpSeries>,
    pub nutrition: Option<NutritionMetrics>,
    pub activity: Option<ActivityMetrics>,
    pub sleep: Option<SleepMetrics>,
}

impl ReportSnapshot {
    /// Snapshot with identity and period only; every sub-report absent
    pub fn empty(nickname: &str, period: DateRange) -> Self {
        Self {
            nickname: nickname.to_string(),
            period,
            wellness: WellnessScore::default(),
            glucose: None,
            agp: None,
            nutrition: None,
            activity: None,
            sleep: None,
        }
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
