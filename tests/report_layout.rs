//! End-to-end layout tests
//!
//! Render whole snapshots through the public engine with a fixed-width text
//! measurer, then check section placement, the adaptive score row and the
//! output sinks.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use wellness_report::layout::RowPlan;
use wellness_report::models::{
    ActivityMetrics, AgpSeries, DateRange, EnergyDistribution, GlucoseMetrics, MacroDistribution,
    NutritionMetrics, ReportSnapshot, ScoredMetric, SleepMetrics, WellnessScore,
};
use wellness_report::output::{render_pdf, render_preview, PdfMetadata};
use wellness_report::render::{DrawCommand, FontSpec, ReportConfig, TextMetrics, TextSize};
use wellness_report::report::{RenderedReport, ReportEngine, Section};

/// Every glyph is half an em wide
struct FixedWidthMetrics;

impl TextMetrics for FixedWidthMetrics {
    fn measure(&self, text: &str, font: FontSpec) -> TextSize {
        TextSize {
            width: text.chars().count() as f32 * font.size * 0.5,
            height: font.size,
        }
    }
}

fn engine() -> ReportEngine<FixedWidthMetrics> {
    ReportEngine::with_metrics(ReportConfig::default(), FixedWidthMetrics)
}

fn period() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
    )
}

fn components(count: usize) -> Vec<ScoredMetric> {
    (0..count)
        .map(|i| ScoredMetric::new(&format!("Metric {}", i + 1), Some(40 + (i as i32 * 7) % 60)))
        .collect()
}

fn full_snapshot() -> ReportSnapshot {
    let hours: Vec<i32> = (0..24).collect();
    let wave = |base: f64| -> Vec<f64> { hours.iter().map(|h| base + (*h as f64 / 4.0).sin()).collect() };

    let mut goal_achievement = BTreeMap::new();
    goal_achievement.insert(10000, 4);

    ReportSnapshot {
        nickname: "Sam".into(),
        period: period(),
        wellness: WellnessScore {
            overall: Some(78),
            components: vec![
                ScoredMetric::new("Glucose", Some(82)),
                ScoredMetric::new("Nutrition", Some(64)),
                ScoredMetric::new("Activity", Some(45)),
                ScoredMetric::new("Sleep", None),
            ],
        },
        glucose: Some(GlucoseMetrics {
            time_in_range: Some(72.0),
            time_in_tight_range: Some(51.0),
            time_below_range: Some(2.0),
            time_above_range: Some(26.0),
            coefficient_of_variation: Some(31.5),
            mean_glucose: Some(7.1),
            gmi: Some(6.4),
        }),
        agp: Some(AgpSeries {
            hours: hours.clone(),
            p10: wave(4.0),
            p25: wave(5.0),
            p50: wave(6.2),
            p75: wave(7.6),
            p90: wave(9.4),
        }),
        nutrition: Some(NutritionMetrics {
            meal_score: Some(74),
            post_meal_success_rate: Some(65.0),
            post_meal_peak: Some(9.2),
            macros: Some(MacroDistribution::new(0.46, 0.30, 0.24)),
            energy: Some(EnergyDistribution::new(520.0, 760.0, 690.0, 110.0)),
        }),
        activity: Some(ActivityMetrics {
            average_steps: Some(8432.0),
            step_goal: Some(8000.0),
            active_minutes: None,
            goal_achievement,
        }),
        sleep: Some(SleepMetrics {
            score: Some(81),
            average_duration_hours: Some(7.3),
            efficiency: Some(88.0),
            average_bedtime: Some("23:15".into()),
        }),
    }
}

fn circle_radii(report: &RenderedReport) -> Vec<f32> {
    report
        .page
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect()
}

fn texts(report: &RenderedReport) -> Vec<&str> {
    report
        .page
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Adaptive score row
// ============================================================================

#[test]
fn test_four_components_use_default_circles() {
    let report = engine().render(&full_snapshot());
    assert_eq!(
        report.layout.secondary_row,
        RowPlan::Circles { diameter: 36.0, spacing: 16.0 }
    );
    let radii = circle_radii(&report);
    assert_eq!(radii.iter().filter(|r| **r == 34.0).count(), 1);
    assert_eq!(radii.iter().filter(|r| **r == 18.0).count(), 4);
    assert_eq!(report.layout.overflow, 0.0);
}

#[test]
fn test_crowded_row_shrinks_spacing_before_diameter() {
    let mut snapshot = full_snapshot();
    snapshot.wellness.components = components(10);
    let report = engine().render(&snapshot);

    match report.layout.secondary_row {
        RowPlan::Circles { diameter, spacing } => {
            assert!((diameter - 36.0).abs() < 1e-3);
            assert!(spacing >= 6.0 && spacing < 16.0);
            // the row exactly fills the width beside the primary circle
            let used = 10.0 * diameter + 9.0 * spacing;
            assert!((used - 444.0).abs() < 1e-3);
        }
        other => panic!("expected circles, got {:?}", other),
    }
}

#[test]
fn test_too_many_components_fall_back_to_badges() {
    let mut snapshot = ReportSnapshot::empty("Sam", period());
    snapshot.wellness.overall = Some(70);
    snapshot.wellness.components = components(16);
    let report = engine().render(&snapshot);

    assert_eq!(report.layout.secondary_row, RowPlan::Badges);
    let badges = report
        .page
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect { corner_radius, .. } if *corner_radius == 6.0))
        .count();
    assert_eq!(badges, 16);
    // only the primary score stays a circle
    assert_eq!(circle_radii(&report).iter().filter(|r| **r == 34.0).count(), 1);

    let wellness = report.layout.section(Section::Wellness).unwrap();
    // primary block, gap, four rows of badges, section gap
    assert_eq!(wellness.height, 84.0 + 8.0 + (4.0 * 40.0 + 3.0 * 8.0) + 14.0);
}

#[test]
fn test_overflow_is_reported_not_fatal() {
    let mut snapshot = full_snapshot();
    snapshot.wellness.components = components(24);
    let report = engine().render(&snapshot);
    assert_eq!(report.layout.secondary_row, RowPlan::Badges);
    assert!(report.layout.overflow > 0.0);
    assert_eq!(report.page.height, 792.0);
}

// ============================================================================
// Section flow
// ============================================================================

#[test]
fn test_omitted_fields_only_shrink_their_own_section() {
    let full = engine().render(&full_snapshot());

    let mut trimmed_snapshot = full_snapshot();
    if let Some(n) = trimmed_snapshot.nutrition.as_mut() {
        n.post_meal_success_rate = None;
        n.post_meal_peak = None;
    }
    if let Some(s) = trimmed_snapshot.sleep.as_mut() {
        s.average_duration_hours = None;
        s.efficiency = None;
    }
    let trimmed = engine().render(&trimmed_snapshot);

    for section in [Section::Header, Section::Wellness, Section::Glucose, Section::Nutrition] {
        assert_eq!(
            full.layout.section(section).unwrap().top,
            trimmed.layout.section(section).unwrap().top,
            "{:?} moved",
            section
        );
    }
    for section in [Section::Header, Section::Wellness, Section::Glucose] {
        assert_eq!(
            full.layout.section(section).unwrap().height,
            trimmed.layout.section(section).unwrap().height
        );
    }

    let nutrition = |r: &RenderedReport| r.layout.section(Section::Nutrition).unwrap().height;
    let activity = |r: &RenderedReport| r.layout.section(Section::ActivitySleep).unwrap().height;
    assert!(nutrition(&trimmed) < nutrition(&full));
    assert!(activity(&trimmed) < activity(&full));
    assert!(!texts(&trimmed).iter().any(|t| t.starts_with("Post-meal")));
}

#[test]
fn test_empty_snapshot_renders_placeholders() {
    let report = engine().render(&ReportSnapshot::empty("Sam", period()));
    let texts = texts(&report);

    // glucose list, AGP, pie, energy, activity, sleep
    assert_eq!(texts.iter().filter(|t| **t == "No data").count(), 6);
    assert!(texts.contains(&"Sep 1, 2026 - Sep 14, 2026"));
    assert_eq!(report.layout.secondary_row, RowPlan::Empty);
    assert_eq!(report.layout.overflow, 0.0);
    assert_eq!(report.layout.sections.len(), 5);
}

#[test]
fn test_json_snapshot_matches_constructed() {
    let json = serde_json::to_string(&full_snapshot()).unwrap();
    let parsed = ReportSnapshot::from_json(&json).unwrap();
    assert_eq!(engine().render(&parsed), engine().render(&full_snapshot()));
}

// ============================================================================
// Determinism and sinks
// ============================================================================

#[test]
fn test_rendering_is_deterministic() {
    let snapshot = full_snapshot();
    let first = engine().render(&snapshot);
    let second = engine().render(&snapshot);
    assert_eq!(first, second);

    let png_a = render_preview(&first.page, 0.5).unwrap();
    let png_b = render_preview(&second.page, 0.5).unwrap();
    assert_eq!(png_a, png_b);

    let metadata = PdfMetadata::new("Wellness Report - Sam", snapshot.period.end);
    let pdf_a = render_pdf(&first.page, &metadata).unwrap();
    let pdf_b = render_pdf(&second.page, &metadata).unwrap();
    assert_eq!(pdf_a, pdf_b);
}

#[test]
fn test_full_report_encodes_as_pdf() {
    let engine = ReportEngine::default();
    let snapshot = full_snapshot();
    let report = engine.render(&snapshot);
    let bytes = render_pdf(&report.page, &PdfMetadata::new("Wellness Report - Sam", snapshot.period.end)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000);
}

#[test]
fn test_config_is_not_shared_between_engines() {
    let mut config = ReportConfig::default();
    config.labels.title = "Weekly Summary".into();
    let custom = ReportEngine::with_metrics(config, FixedWidthMetrics);
    let default = engine();

    let snapshot = ReportSnapshot::empty("Sam", period());
    assert!(texts(&custom.render(&snapshot)).contains(&"Weekly Summary"));
    assert!(texts(&default.render(&snapshot)).contains(&"Wellness Report"));
}
