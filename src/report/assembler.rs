//! Document assembler
//!
//! Stacks the sections top to bottom on a single page. The engine owns an
//! immutable configuration and a text measurer; rendering the same snapshot
//! twice yields equal pages.

use serde::Serialize;

use crate::layout::{LayoutCursor, RowPlan};
use crate::models::ReportSnapshot;
use crate::render::{HelveticaMetrics, Page, Painter, ReportConfig, TextMetrics};

use super::sections::{
    draw_activity_sleep_section, draw_glucose_section, draw_header, draw_nutrition_section,
    draw_wellness_section,
};

/// Page sections in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Wellness,
    Glucose,
    Nutrition,
    ActivitySleep,
}

/// Where one section landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionExtent {
    pub section: Section,
    pub top: f32,
    pub height: f32,
}

/// Layout decisions made while rendering, for callers and logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub sections: Vec<SectionExtent>,
    pub secondary_row: RowPlan,
    /// How far content runs past the bottom margin; 0 when it fits
    pub overflow: f32,
}

impl LayoutSummary {
    pub fn section(&self, section: Section) -> Option<&SectionExtent> {
        self.sections.iter().find(|s| s.section == section)
    }
}

/// A rendered page and the layout that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    pub page: Page,
    pub layout: LayoutSummary,
}

/// Renders snapshots into single-page reports
pub struct ReportEngine<M: TextMetrics = HelveticaMetrics> {
    config: ReportConfig,
    metrics: M,
}

impl ReportEngine<HelveticaMetrics> {
    /// Engine measuring text with the built-in Helvetica widths
    pub fn new(config: ReportConfig) -> Self {
        Self::with_metrics(config, HelveticaMetrics)
    }
}

impl Default for ReportEngine<HelveticaMetrics> {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl<M: TextMetrics> ReportEngine<M> {
    pub fn with_metrics(config: ReportConfig, metrics: M) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Lay out and draw the whole report
    pub fn render(&self, snapshot: &ReportSnapshot) -> RenderedReport {
        let mut painter = Painter::new(&self.metrics, &self.config);
        let mut cursor = LayoutCursor::new(self.config.page.margin);
        let mut sections = Vec::with_capacity(5);

        let mut place = |section: Section, cursor: &mut LayoutCursor, height: f32| {
            sections.push(SectionExtent {
                section,
                top: cursor.y(),
                height,
            });
            cursor.advance(height);
        };

        let height = draw_header(&mut painter, snapshot);
        place(Section::Header, &mut cursor, height);

        let (height, secondary_row) = draw_wellness_section(&mut painter, snapshot, cursor.y());
        place(Section::Wellness, &mut cursor, height);

        let height = draw_glucose_section(&mut painter, snapshot, cursor.y());
        place(Section::Glucose, &mut cursor, height);

        let height = draw_nutrition_section(&mut painter, snapshot, cursor.y());
        place(Section::Nutrition, &mut cursor, height);

        let height = draw_activity_sleep_section(&mut painter, snapshot, cursor.y());
        place(Section::ActivitySleep, &mut cursor, height);

        let overflow = (cursor.y() - self.config.page.content_bottom()).max(0.0);
        if overflow > 0.0 {
            tracing::warn!(
                overflow,
                nickname = %snapshot.nickname,
                "report content runs past the bottom margin and will be clipped"
            );
        }

        let page = painter.into_page();
        tracing::debug!(
            commands = page.commands.len(),
            bottom = cursor.y(),
            "report page laid out"
        );

        RenderedReport {
            page,
            layout: LayoutSummary {
                sections,
                secondary_row,
                overflow,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, ScoredMetric};
    use chrono::NaiveDate;

    fn snapshot() -> ReportSnapshot {
        let mut snapshot = ReportSnapshot::empty(
            "Sam",
            DateRange::new(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            ),
        );
        snapshot.wellness.overall = Some(78);
        snapshot.wellness.components = vec![
            ScoredMetric::new("Glucose", Some(82)),
            ScoredMetric::new("Nutrition", Some(64)),
            ScoredMetric::new("Activity", Some(45)),
            ScoredMetric::new("Sleep", None),
        ];
        snapshot
    }

    #[test]
    fn test_sections_stack_in_order() {
        let engine = ReportEngine::default();
        let report = engine.render(&snapshot());
        let order: Vec<Section> = report.layout.sections.iter().map(|s| s.section).collect();
        assert_eq!(
            order,
            vec![
                Section::Header,
                Section::Wellness,
                Section::Glucose,
                Section::Nutrition,
                Section::ActivitySleep
            ]
        );
        for pair in report.layout.sections.windows(2) {
            assert!((pair[0].top + pair[0].height - pair[1].top).abs() < 1e-4);
        }
        assert_eq!(report.layout.sections[0].top, 36.0);
    }

    #[test]
    fn test_empty_snapshot_fits_the_page() {
        let engine = ReportEngine::default();
        let report = engine.render(&snapshot());
        assert_eq!(report.layout.overflow, 0.0);
        assert_eq!(report.page.width, 612.0);
        assert_eq!(report.page.height, 792.0);
    }

    #[test]
    fn test_render_is_repeatable() {
        let engine = ReportEngine::default();
        let snap = snapshot();
        assert_eq!(engine.render(&snap), engine.render(&snap));
    }
}
