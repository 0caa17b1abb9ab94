//! Data models
//!
//! The read-only report snapshot and the scored metric unit the layout
//! engine arranges.

mod metric;
mod snapshot;

pub use metric::ScoredMetric;
pub use snapshot::{
    ActivityMetrics, AgpSeries, DateRange, EnergyDistribution, GlucoseMetrics, MacroDistribution,
    NutritionMetrics, ReportSnapshot, SleepMetrics, WellnessScore,
};
