//! Report configuration
//!
//! Every fixed color, margin, size and label the renderer uses lives in one
//! immutable [`ReportConfig`] value handed to the engine at construction.
//! Two engines with different configs can render side by side.

use serde::{Deserialize, Serialize};

use super::geometry::Rgb;

/// Page size and margins in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // US Letter
        Self {
            width: 612.0,
            height: 792.0,
            margin: 36.0,
        }
    }
}

impl PageGeometry {
    pub fn content_left(&self) -> f32 {
        self.margin
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

/// Report color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub good: Rgb,
    pub warning: Rgb,
    pub critical: Rgb,
    pub neutral_fill: Rgb,
    pub neutral_text: Rgb,
    pub score_text: Rgb,
    pub title: Rgb,
    pub text: Rgb,
    pub muted_text: Rgb,
    pub rule: Rgb,
    pub agp_target_band: Rgb,
    pub agp_outer_band: Rgb,
    pub agp_inner_band: Rgb,
    pub agp_median: Rgb,
    pub axis: Rgb,
    pub carbohydrate: Rgb,
    pub protein: Rgb,
    pub fat: Rgb,
    pub morning: Rgb,
    pub midday: Rgb,
    pub evening: Rgb,
    pub night: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            good: Rgb(0, 176, 80),
            warning: Rgb(255, 165, 0),
            critical: Rgb(255, 0, 0),
            neutral_fill: Rgb(220, 220, 220),
            neutral_text: Rgb(90, 90, 90),
            score_text: Rgb::WHITE,
            title: Rgb(0, 70, 140),
            text: Rgb::BLACK,
            muted_text: Rgb(128, 128, 128),
            rule: Rgb(128, 128, 128),
            agp_target_band: Rgb(226, 244, 232),
            agp_outer_band: Rgb(198, 219, 239),
            agp_inner_band: Rgb(120, 167, 214),
            agp_median: Rgb(0, 70, 140),
            axis: Rgb(160, 160, 160),
            carbohydrate: Rgb(255, 165, 0),
            protein: Rgb(0, 112, 192),
            fat: Rgb(112, 48, 160),
            morning: Rgb(255, 200, 0),
            midday: Rgb(255, 130, 0),
            evening: Rgb(112, 48, 160),
            night: Rgb(0, 70, 140),
        }
    }
}

/// Sizing for the primary score and its adaptive secondary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRowSizing {
    pub primary_diameter: f32,
    /// Gap between the primary circle and the first secondary circle
    pub primary_gap: f32,
    pub diameter: f32,
    pub spacing: f32,
    pub min_spacing: f32,
    pub min_diameter: f32,
    pub badge_width: f32,
    pub badge_height: f32,
    pub badge_spacing: f32,
    pub badge_corner_radius: f32,
    /// Opacity of the band tint behind a badge
    pub badge_fill_alpha: f32,
    pub badge_border_alpha: f32,
    pub label_gap: f32,
}

impl Default for ScoreRowSizing {
    fn default() -> Self {
        Self {
            primary_diameter: 68.0,
            primary_gap: 28.0,
            diameter: 36.0,
            spacing: 16.0,
            min_spacing: 6.0,
            min_diameter: 24.0,
            badge_width: 112.0,
            badge_height: 40.0,
            badge_spacing: 8.0,
            badge_corner_radius: 6.0,
            badge_fill_alpha: 0.15,
            badge_border_alpha: 0.6,
            label_gap: 4.0,
        }
    }
}

/// Vertical rhythm shared by all sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSizing {
    pub header_height: f32,
    pub section_title_height: f32,
    pub section_gap: f32,
    pub row_with_target: f32,
    pub row_plain: f32,
    pub subtitle_height: f32,
    pub placeholder_height: f32,
    /// Left column share of a two-column section
    pub left_column_ratio: f32,
    pub column_gap: f32,
}

impl Default for FlowSizing {
    fn default() -> Self {
        Self {
            header_height: 52.0,
            section_title_height: 16.0,
            section_gap: 14.0,
            row_with_target: 28.0,
            row_plain: 18.0,
            subtitle_height: 14.0,
            placeholder_height: 40.0,
            left_column_ratio: 0.38,
            column_gap: 16.0,
        }
    }
}

/// Chart footprints and domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSizing {
    pub agp_height: f32,
    pub agp_axis_width: f32,
    pub agp_tick_height: f32,
    /// Glucose domain upper bound in mmol/L; the lower bound is 0
    pub agp_domain_max: f32,
    pub agp_target_low: f32,
    pub agp_target_high: f32,
    pub agp_median_width: f32,
    pub pie_diameter: f32,
    pub pie_block_width: f32,
    pub legend_row_height: f32,
    pub meal_circle_diameter: f32,
    pub bar_height: f32,
    pub bar_spacing: f32,
    pub bar_label_width: f32,
}

impl Default for ChartSizing {
    fn default() -> Self {
        Self {
            agp_height: 150.0,
            agp_axis_width: 24.0,
            agp_tick_height: 14.0,
            agp_domain_max: 15.0,
            agp_target_low: 3.9,
            agp_target_high: 10.0,
            agp_median_width: 1.5,
            pie_diameter: 64.0,
            pie_block_width: 100.0,
            legend_row_height: 12.0,
            meal_circle_diameter: 44.0,
            bar_height: 14.0,
            bar_spacing: 8.0,
            bar_label_width: 90.0,
        }
    }
}

/// Display strings; swapping these is the only localization supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    pub date_separator: String,
    pub wellness_score: String,
    pub no_data: String,
    /// Prefix of the muted line under a metric row
    pub target_prefix: String,
    pub goal_prefix: String,
    pub glucose_section: String,
    pub agp_title: String,
    pub time_in_range: String,
    pub time_in_tight_range: String,
    pub time_below_range: String,
    pub time_above_range: String,
    pub coefficient_of_variation: String,
    pub mean_glucose: String,
    pub gmi: String,
    pub nutrition_section: String,
    pub meal_score: String,
    pub post_meal_success: String,
    pub post_meal_peak: String,
    pub carbohydrate: String,
    pub protein: String,
    pub fat: String,
    pub energy_title: String,
    pub morning: String,
    pub midday: String,
    pub evening: String,
    pub night: String,
    pub activity_section: String,
    pub average_steps: String,
    pub active_minutes: String,
    pub step_goals_title: String,
    pub steps_suffix: String,
    pub days_suffix: String,
    pub sleep_title: String,
    pub sleep_score: String,
    pub sleep_duration: String,
    pub sleep_efficiency: String,
    pub bedtime: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Wellness Report".into(),
            date_separator: " - ".into(),
            wellness_score: "Wellness".into(),
            no_data: "No data".into(),
            target_prefix: "Target: ".into(),
            goal_prefix: "Goal: ".into(),
            glucose_section: "Glucose".into(),
            agp_title: "Ambulatory Glucose Profile (mmol/L)".into(),
            time_in_range: "Time in Range".into(),
            time_in_tight_range: "Time in Tight Range".into(),
            time_below_range: "Time Below Range".into(),
            time_above_range: "Time Above Range".into(),
            coefficient_of_variation: "Glucose Variability (CV)".into(),
            mean_glucose: "Mean Glucose".into(),
            gmi: "GMI".into(),
            nutrition_section: "Nutrition".into(),
            meal_score: "Meals".into(),
            post_meal_success: "Post-meal Success".into(),
            post_meal_peak: "Post-meal Peak".into(),
            carbohydrate: "Carbs".into(),
            protein: "Protein".into(),
            fat: "Fat".into(),
            energy_title: "Energy by Time of Day".into(),
            morning: "Morning".into(),
            midday: "Midday".into(),
            evening: "Evening".into(),
            night: "Night".into(),
            activity_section: "Activity & Sleep".into(),
            average_steps: "Average Steps".into(),
            active_minutes: "Active Minutes".into(),
            step_goals_title: "Days at Step Goal".into(),
            steps_suffix: "steps".into(),
            days_suffix: "days".into(),
            sleep_title: "Sleep".into(),
            sleep_score: "Sleep Score".into(),
            sleep_duration: "Average Duration".into(),
            sleep_efficiency: "Efficiency".into(),
            bedtime: "Average Bedtime".into(),
        }
    }
}

/// Immutable renderer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page: PageGeometry,
    pub palette: Palette,
    pub score_row: ScoreRowSizing,
    pub flow: FlowSizing,
    pub charts: ChartSizing,
    pub labels: Labels,
    /// chrono strftime pattern for the header date range
    pub date_format: String,
}

impl ReportConfig {
    /// US Letter defaults with the given date display pattern
    pub fn with_date_format(mut self, pattern: &str) -> Self {
        self.date_format = pattern.to_string();
        self
    }

    pub fn date_format(&self) -> &str {
        if self.date_format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            &self.date_format
        }
    }
}

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";
