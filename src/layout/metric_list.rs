//! Compact metric rows
//!
//! A metric row is a band-colored dot, the label, the value right-aligned,
//! and optionally a target line underneath. Rows report a fixed height so
//! lists stack without a measuring pass.

use crate::models::ScoredMetric;
use crate::render::{Align, FontSpec, Painter, Point};
use crate::score::ScoreBand;

use super::cursor::Column;

const DOT_RADIUS: f32 = 3.5;
const LABEL_FONT_SIZE: f32 = 9.0;
const VALUE_FONT_SIZE: f32 = 10.0;
const TARGET_FONT_SIZE: f32 = 7.5;

/// Height a row will consume
pub fn row_height(metric: &ScoredMetric, painter: &Painter) -> f32 {
    let flow = &painter.config().flow;
    if metric.target.is_some() {
        flow.row_with_target
    } else {
        flow.row_plain
    }
}

/// Draw one metric row at `top` inside `column`; returns its height
pub fn draw_metric_row(painter: &mut Painter, column: Column, top: f32, metric: &ScoredMetric) -> f32 {
    let palette = &painter.config().palette;
    let band = ScoreBand::of_optional(metric.score);
    let baseline = top + LABEL_FONT_SIZE + 3.0;

    painter.circle(
        Point::new(column.x + DOT_RADIUS, baseline - LABEL_FONT_SIZE * 0.35),
        DOT_RADIUS,
        band.fill(palette),
    );

    let value = metric.value_text();
    let value_font = FontSpec::bold(VALUE_FONT_SIZE);
    let value_width = painter.text(&value, column.right(), baseline, value_font, band.accent(palette), Align::Right);

    let label_x = column.x + DOT_RADIUS * 2.0 + 5.0;
    let label_room = (column.right() - value_width - 6.0 - label_x).max(0.0);
    painter.text_clipped(
        &metric.label,
        label_x,
        baseline,
        FontSpec::regular(LABEL_FONT_SIZE),
        palette.text,
        Align::Left,
        label_room,
    );

    if let Some(target) = &metric.target {
        painter.text_clipped(
            target,
            label_x,
            baseline + TARGET_FONT_SIZE + 3.0,
            FontSpec::regular(TARGET_FONT_SIZE),
            palette.muted_text,
            Align::Left,
            (column.right() - label_x).max(0.0),
        );
    }

    row_height(metric, painter)
}

/// Draw rows top to bottom; returns the total height
pub fn draw_metric_list(painter: &mut Painter, column: Column, top: f32, metrics: &[ScoredMetric]) -> f32 {
    let mut y = top;
    for metric in metrics {
        y += draw_metric_row(painter, column, y, metric);
    }
    y - top
}
