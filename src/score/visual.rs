//! Score circles and badges

use crate::models::ScoredMetric;
use crate::render::{Align, FontSpec, Painter, Point, Rect, Stroke};

use super::band::ScoreBand;

const LABEL_FONT_SIZE: f32 = 9.0;
const PRIMARY_LABEL_FONT_SIZE: f32 = 10.0;
const PRIMARY_VALUE_FONT_SIZE: f32 = 24.0;
const MIN_VALUE_FONT_SIZE: f32 = 8.0;
const BADGE_PADDING: f32 = 8.0;
const BADGE_LABEL_FONT_SIZE: f32 = 9.0;
const BADGE_VALUE_FONT_SIZE: f32 = 14.0;

fn label_font(primary: bool) -> FontSpec {
    if primary {
        FontSpec::bold(PRIMARY_LABEL_FONT_SIZE)
    } else {
        FontSpec::regular(LABEL_FONT_SIZE)
    }
}

fn value_font(diameter: f32, primary: bool) -> FontSpec {
    if primary {
        FontSpec::bold(PRIMARY_VALUE_FONT_SIZE)
    } else {
        FontSpec::bold((diameter * 0.36).max(MIN_VALUE_FONT_SIZE))
    }
}

/// Height of a circle plus the label drawn beneath it
pub fn circle_block_height(diameter: f32, label_gap: f32, primary: bool) -> f32 {
    diameter + label_gap + label_font(primary).size + 2.0
}

/// Draw a score circle with its label centered underneath.
///
/// `label_width` is the horizontal clip for the label. Returns the block
/// height consumed below the circle's top edge.
pub fn draw_score_circle(
    painter: &mut Painter,
    center: Point,
    diameter: f32,
    primary: bool,
    metric: &ScoredMetric,
    label_width: f32,
) -> f32 {
    let config = painter.config();
    let palette = &config.palette;
    let label_gap = config.score_row.label_gap;
    let band = ScoreBand::of_optional(metric.score);
    let radius = diameter / 2.0;

    painter.circle(center, radius, band.fill(palette));

    let font = value_font(diameter, primary);
    let value = metric.value_text();
    // cap height of Helvetica is ~0.72 em; center it on the circle
    let baseline = center.y + font.size * 0.36;
    painter.text_clipped(
        &value,
        center.x,
        baseline,
        font,
        band.text_on_fill(palette),
        Align::Center,
        diameter * 0.9,
    );

    let label = label_font(primary);
    let label_baseline = center.y + radius + label_gap + label.size;
    painter.text_clipped(
        &metric.label,
        center.x,
        label_baseline,
        label,
        palette.text,
        Align::Center,
        label_width,
    );

    circle_block_height(diameter, label_gap, primary)
}

/// Draw a badge: tinted rounded rectangle, label top-left, value bottom-right
pub fn draw_score_badge(painter: &mut Painter, rect: Rect, metric: &ScoredMetric) {
    let config = painter.config();
    let palette = &config.palette;
    let sizing = &config.score_row;
    let band = ScoreBand::of_optional(metric.score);
    let tint = band.fill(palette);

    painter.rounded_rect(
        rect,
        sizing.badge_corner_radius,
        Some(tint.over_white(sizing.badge_fill_alpha)),
        Some(Stroke::new(tint.over_white(sizing.badge_border_alpha), 1.0)),
    );

    let inner_width = (rect.width - 2.0 * BADGE_PADDING).max(0.0);
    painter.text_clipped(
        &metric.label,
        rect.x + BADGE_PADDING,
        rect.y + BADGE_PADDING + BADGE_LABEL_FONT_SIZE,
        FontSpec::regular(BADGE_LABEL_FONT_SIZE),
        palette.text,
        Align::Left,
        inner_width,
    );
    painter.text_clipped(
        &metric.value_text(),
        rect.right() - BADGE_PADDING,
        rect.bottom() - BADGE_PADDING,
        FontSpec::bold(BADGE_VALUE_FONT_SIZE),
        band.accent(palette),
        Align::Right,
        inner_width,
    );
}
