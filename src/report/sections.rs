//! Report sections
//!
//! Each section draws itself starting at a given top offset and returns the
//! vertical space it consumed, including its trailing gap. Sections never
//! look at each other; the assembler only stacks their heights.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::charts::{draw_agp_chart, draw_energy_bars, draw_macro_pie, energy_bars_height};
use crate::layout::{draw_metric_list, draw_score_row, Column, ColumnCursor, ColumnSplit, RowPlan};
use crate::models::{ActivityMetrics, GlucoseMetrics, NutritionMetrics, ReportSnapshot, ScoredMetric, SleepMetrics};
use crate::render::{Align, FontSpec, Labels, Painter, Point, Rect, Stroke, DEFAULT_DATE_FORMAT};
use crate::score::{draw_score_circle, MetricKind};

const TITLE_FONT_SIZE: f32 = 18.0;
const NICKNAME_FONT_SIZE: f32 = 11.0;
const SECTION_FONT_SIZE: f32 = 11.0;
const SUBTITLE_FONT_SIZE: f32 = 8.5;
const MEAL_LABEL_WIDTH_FACTOR: f32 = 1.6;
const POST_MEAL_GAP: f32 = 6.0;
const NUTRITION_LEFT_RATIO: f32 = 0.5;
const ACTIVITY_LEFT_RATIO: f32 = 0.5;

// ============================================================================
// Formatting helpers
// ============================================================================

/// Format a date with a user pattern, falling back to the default pattern
/// when the user pattern is not valid strftime
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    tracing::warn!(pattern, "invalid date format, using default");
    out.clear();
    match write!(out, "{}", date.format(DEFAULT_DATE_FORMAT)) {
        Ok(()) => out,
        Err(_) => date.to_string(),
    }
}

/// Integer with thousands separators: 12345 -> "12,345"
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn target(labels: &Labels, text: &str) -> String {
    format!("{}{}", labels.target_prefix, text)
}

fn percent_metric(label: &str, kind: MetricKind, value: f64, target_text: String) -> ScoredMetric {
    ScoredMetric::new(label, kind.score(value, None))
        .with_display(format!("{:.0}%", value))
        .with_target(&target_text)
}

fn draw_section_title(painter: &mut Painter, title: &str, top: f32) -> f32 {
    let config = painter.config();
    let page = &config.page;
    let baseline = top + SECTION_FONT_SIZE;
    painter.text(
        title,
        page.content_left(),
        baseline,
        FontSpec::bold(SECTION_FONT_SIZE),
        config.palette.title,
        Align::Left,
    );
    painter.line(
        Point::new(page.content_left(), baseline + 3.0),
        Point::new(page.content_right(), baseline + 3.0),
        Stroke::new(config.palette.rule, 0.5),
    );
    config.flow.section_title_height
}

fn draw_subtitle(painter: &mut Painter, column: Column, top: f32, text: &str) -> f32 {
    let config = painter.config();
    painter.text_clipped(
        text,
        column.x,
        top + SUBTITLE_FONT_SIZE,
        FontSpec::bold(SUBTITLE_FONT_SIZE),
        config.palette.muted_text,
        Align::Left,
        column.width,
    );
    config.flow.subtitle_height
}

fn draw_placeholder(painter: &mut Painter, column: Column, top: f32) -> f32 {
    let height = painter.config().flow.placeholder_height;
    crate::charts::draw_no_data(painter, Rect::new(column.x, top, column.width, height))
}

// ============================================================================
// Header
// ============================================================================

/// Title, nickname and the formatted reporting period over a rule
pub fn draw_header(painter: &mut Painter, snapshot: &ReportSnapshot) -> f32 {
    let config = painter.config();
    let page = &config.page;
    let labels = &config.labels;
    let palette = &config.palette;
    let top = page.margin;

    painter.text(
        &labels.title,
        page.content_left(),
        top + TITLE_FONT_SIZE,
        FontSpec::bold(TITLE_FONT_SIZE),
        palette.title,
        Align::Left,
    );

    let info_baseline = top + TITLE_FONT_SIZE + NICKNAME_FONT_SIZE + 7.0;
    let pattern = config.date_format();
    let period = format!(
        "{}{}{}",
        format_date(snapshot.period.start, pattern),
        labels.date_separator,
        format_date(snapshot.period.end, pattern)
    );
    let period_width = painter.text(
        &period,
        page.content_right(),
        info_baseline,
        FontSpec::regular(NICKNAME_FONT_SIZE),
        palette.text,
        Align::Right,
    );
    painter.text_clipped(
        &snapshot.nickname,
        page.content_left(),
        info_baseline,
        FontSpec::bold(NICKNAME_FONT_SIZE),
        palette.text,
        Align::Left,
        (page.content_width() - period_width - 12.0).max(0.0),
    );

    let rule_y = info_baseline + 6.0;
    painter.line(
        Point::new(page.content_left(), rule_y),
        Point::new(page.content_right(), rule_y),
        Stroke::new(palette.rule, 1.0),
    );

    config.flow.header_height
}

// ============================================================================
// Wellness score row
// ============================================================================

/// Primary wellness circle plus the adaptive row of component scores
pub fn draw_wellness_section(painter: &mut Painter, snapshot: &ReportSnapshot, top: f32) -> (f32, RowPlan) {
    let config = painter.config();
    let primary = ScoredMetric::new(&config.labels.wellness_score, snapshot.wellness.overall);
    let (height, plan) = draw_score_row(painter, top, &primary, &snapshot.wellness.components);
    (height + config.flow.section_gap, plan)
}

// ============================================================================
// Glucose
// ============================================================================

/// Metric rows for every glucose statistic present, in display order
pub fn glucose_metric_rows(labels: &Labels, glucose: &GlucoseMetrics) -> Vec<ScoredMetric> {
    let mut rows = Vec::new();
    if let Some(v) = glucose.time_in_range {
        rows.push(percent_metric(&labels.time_in_range, MetricKind::TimeInRange, v, target(labels, ">70%")));
    }
    if let Some(v) = glucose.time_in_tight_range {
        rows.push(percent_metric(
            &labels.time_in_tight_range,
            MetricKind::TimeInTightRange,
            v,
            target(labels, ">50%"),
        ));
    }
    if let Some(v) = glucose.time_below_range {
        rows.push(percent_metric(&labels.time_below_range, MetricKind::TimeBelowRange, v, target(labels, "<4%")));
    }
    if let Some(v) = glucose.time_above_range {
        rows.push(percent_metric(&labels.time_above_range, MetricKind::TimeAboveRange, v, target(labels, "<25%")));
    }
    if let Some(v) = glucose.coefficient_of_variation {
        rows.push(percent_metric(
            &labels.coefficient_of_variation,
            MetricKind::CoefficientOfVariation,
            v,
            target(labels, "<=36%"),
        ));
    }
    if let Some(v) = glucose.mean_glucose {
        rows.push(
            ScoredMetric::new(&labels.mean_glucose, MetricKind::MeanGlucose.score(v, None))
                .with_display(format!("{:.1}", v))
                .with_target(&target(labels, "3.9-10.0 mmol/L")),
        );
    }
    if let Some(v) = glucose.gmi {
        rows.push(
            ScoredMetric::new(&labels.gmi, MetricKind::Gmi.score(v, None))
                .with_display(format!("{:.1}%", v))
                .with_target(&target(labels, "<7%")),
        );
    }
    rows
}

/// Glucose statistics on the left, the AGP chart on the right
pub fn draw_glucose_section(painter: &mut Painter, snapshot: &ReportSnapshot, top: f32) -> f32 {
    let config = painter.config();
    let page = &config.page;
    let flow = &config.flow;

    let title_height = draw_section_title(painter, &config.labels.glucose_section, top);
    let columns_top = top + title_height;
    let split = ColumnSplit::from_flow(page.content_left(), page.content_width(), flow);
    let mut cursor = ColumnCursor::new(columns_top);

    let rows = snapshot
        .glucose
        .as_ref()
        .map(|g| glucose_metric_rows(&config.labels, g))
        .unwrap_or_default();
    let left_height = if rows.is_empty() {
        draw_placeholder(painter, split.left, cursor.left_y())
    } else {
        draw_metric_list(painter, split.left, cursor.left_y(), &rows)
    };
    cursor.advance_left(left_height);

    let subtitle = draw_subtitle(painter, split.right, cursor.right_y(), &config.labels.agp_title);
    cursor.advance_right(subtitle);
    let chart_area = Rect::new(split.right.x, cursor.right_y(), split.right.width, config.charts.agp_height);
    let chart_height = draw_agp_chart(painter, chart_area, snapshot.agp.as_ref());
    cursor.advance_right(chart_height);

    title_height + cursor.height() + flow.section_gap
}

// ============================================================================
// Nutrition
// ============================================================================

/// Post-meal rows for whichever post-meal fields are present
pub fn post_meal_rows(labels: &Labels, nutrition: &NutritionMetrics) -> Vec<ScoredMetric> {
    let mut rows = Vec::new();
    if let Some(v) = nutrition.post_meal_success_rate {
        rows.push(percent_metric(
            &labels.post_meal_success,
            MetricKind::PostMealSuccess,
            v,
            target(labels, ">=70%"),
        ));
    }
    if let Some(v) = nutrition.post_meal_peak {
        rows.push(
            ScoredMetric::new(&labels.post_meal_peak, MetricKind::PostMealPeak.score(v, None))
                .with_display(format!("{:.1}", v))
                .with_target(&target(labels, "<=10.0 mmol/L")),
        );
    }
    rows
}

/// Meal score circle, post-meal rows and macro pie on the left; energy
/// bars on the right
pub fn draw_nutrition_section(painter: &mut Painter, snapshot: &ReportSnapshot, top: f32) -> f32 {
    let config = painter.config();
    let page = &config.page;
    let flow = &config.flow;
    let charts = &config.charts;
    let labels = &config.labels;

    let title_height = draw_section_title(painter, &labels.nutrition_section, top);
    let columns_top = top + title_height;
    let split = ColumnSplit::new(
        page.content_left(),
        page.content_width(),
        NUTRITION_LEFT_RATIO,
        flow.column_gap,
    );
    let mut cursor = ColumnCursor::new(columns_top);

    let fallback = NutritionMetrics::default();
    let nutrition = snapshot.nutrition.as_ref().unwrap_or(&fallback);

    // left column: meal circle over post-meal rows, pie beside them
    let pie_width = charts.pie_block_width.min(split.left.width);
    let scores = Column {
        x: split.left.x,
        width: (split.left.width - pie_width).max(0.0),
    };
    let d = charts.meal_circle_diameter;
    let meal = ScoredMetric::new(&labels.meal_score, nutrition.meal_score);
    let meal_center = Point::new(scores.x + d / 2.0, columns_top + d / 2.0);
    let mut scores_height = draw_score_circle(painter, meal_center, d, false, &meal, d * MEAL_LABEL_WIDTH_FACTOR);

    let rows = post_meal_rows(labels, nutrition);
    if !rows.is_empty() {
        let rows_column = Column {
            x: scores.x,
            width: (scores.width - 8.0).max(0.0),
        };
        scores_height += POST_MEAL_GAP;
        scores_height += draw_metric_list(painter, rows_column, columns_top + scores_height, &rows);
    }

    let pie_area = Rect::new(scores.right(), columns_top, pie_width, 0.0);
    let pie_height = draw_macro_pie(painter, pie_area, nutrition.macros.as_ref());
    cursor.advance_left(scores_height.max(pie_height));

    // right column: energy distribution
    let subtitle = draw_subtitle(painter, split.right, cursor.right_y(), &labels.energy_title);
    cursor.advance_right(subtitle);
    let bars_area = Rect::new(split.right.x, cursor.right_y(), split.right.width, energy_bars_height(painter));
    let bars_height = draw_energy_bars(painter, bars_area, nutrition.energy.as_ref());
    cursor.advance_right(bars_height);

    title_height + cursor.height() + flow.section_gap
}

// ============================================================================
// Activity and sleep
// ============================================================================

/// Step and active-minute rows for whichever fields are present
pub fn activity_rows(labels: &Labels, activity: &ActivityMetrics) -> Vec<ScoredMetric> {
    let mut rows = Vec::new();
    if let Some(steps) = activity.average_steps {
        let mut row = ScoredMetric::new(&labels.average_steps, MetricKind::AverageSteps.score(steps, activity.step_goal))
            .with_display(group_thousands(steps.round() as i64));
        if let Some(goal) = activity.step_goal.filter(|g| g.is_finite() && *g > 0.0) {
            row = row.with_target(&format!(
                "{}{} {}",
                labels.goal_prefix,
                group_thousands(goal.round() as i64),
                labels.steps_suffix
            ));
        }
        rows.push(row);
    }
    if let Some(minutes) = activity.active_minutes {
        rows.push(
            ScoredMetric::new(&labels.active_minutes, MetricKind::ActiveMinutes.score(minutes, None))
                .with_display(format!("{:.0} min", minutes))
                .with_target(&target(labels, ">=30 min")),
        );
    }
    rows
}

/// One plain row per step threshold, ascending, scored by its share of the
/// reporting period
pub fn goal_achievement_rows(labels: &Labels, activity: &ActivityMetrics, period_days: i64) -> Vec<ScoredMetric> {
    activity
        .goal_achievement
        .iter()
        .map(|(threshold, days)| {
            ScoredMetric::new(
                &format!("{}+ {}", group_thousands(*threshold as i64), labels.steps_suffix),
                MetricKind::GoalDays.score(*days as f64, Some(period_days as f64)),
            )
            .with_display(format!("{} {}", days, labels.days_suffix))
        })
        .collect()
}

/// Sleep rows for whichever fields are present
pub fn sleep_rows(labels: &Labels, sleep: &SleepMetrics) -> Vec<ScoredMetric> {
    let mut rows = Vec::new();
    if let Some(score) = sleep.score {
        rows.push(ScoredMetric::new(&labels.sleep_score, Some(score)));
    }
    if let Some(hours) = sleep.average_duration_hours {
        rows.push(
            ScoredMetric::new(&labels.sleep_duration, MetricKind::SleepDuration.score(hours, None))
                .with_display(format!("{:.1} h", hours))
                .with_target(&target(labels, "7-9 h")),
        );
    }
    if let Some(efficiency) = sleep.efficiency {
        rows.push(percent_metric(
            &labels.sleep_efficiency,
            MetricKind::SleepEfficiency,
            efficiency,
            target(labels, ">=85%"),
        ));
    }
    if let Some(bedtime) = sleep.average_bedtime.as_deref().filter(|b| !b.is_empty()) {
        rows.push(ScoredMetric::new(&labels.bedtime, None).with_display(bedtime.to_string()));
    }
    rows
}

/// Steps and goal achievement on the left, sleep on the right
pub fn draw_activity_sleep_section(painter: &mut Painter, snapshot: &ReportSnapshot, top: f32) -> f32 {
    let config = painter.config();
    let page = &config.page;
    let flow = &config.flow;
    let labels = &config.labels;

    let title_height = draw_section_title(painter, &labels.activity_section, top);
    let columns_top = top + title_height;
    let split = ColumnSplit::new(
        page.content_left(),
        page.content_width(),
        ACTIVITY_LEFT_RATIO,
        flow.column_gap,
    );
    let mut cursor = ColumnCursor::new(columns_top);

    match &snapshot.activity {
        Some(activity) => {
            let rows = activity_rows(labels, activity);
            let goals = goal_achievement_rows(labels, activity, snapshot.period.days());
            if rows.is_empty() && goals.is_empty() {
                let h = draw_placeholder(painter, split.left, cursor.left_y());
                cursor.advance_left(h);
            }
            let h = draw_metric_list(painter, split.left, cursor.left_y(), &rows);
            cursor.advance_left(h);
            if !goals.is_empty() {
                let h = draw_subtitle(painter, split.left, cursor.left_y(), &labels.step_goals_title);
                cursor.advance_left(h);
                let h = draw_metric_list(painter, split.left, cursor.left_y(), &goals);
                cursor.advance_left(h);
            }
        }
        None => {
            let h = draw_placeholder(painter, split.left, cursor.left_y());
            cursor.advance_left(h);
        }
    }

    let h = draw_subtitle(painter, split.right, cursor.right_y(), &labels.sleep_title);
    cursor.advance_right(h);
    let rows = snapshot
        .sleep
        .as_ref()
        .map(|s| sleep_rows(labels, s))
        .unwrap_or_default();
    let h = if rows.is_empty() {
        draw_placeholder(painter, split.right, cursor.right_y())
    } else {
        draw_metric_list(painter, split.right, cursor.right_y(), &rows)
    };
    cursor.advance_right(h);

    title_height + cursor.height() + flow.section_gap
}
