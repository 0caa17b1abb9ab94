//! Adaptive secondary score row
//!
//! Places N secondary scores to the right of the large primary circle. When
//! the leftover width cannot hold legible circles the whole row switches to
//! fixed-size badges stacked below the primary score. The decision is made
//! once per row; metrics never mix representations.

use serde::Serialize;

use crate::models::ScoredMetric;
use crate::render::{Painter, Point, Rect, ScoreRowSizing};
use crate::score::{draw_score_badge, draw_score_circle};

/// Representation chosen for the secondary row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowPlan {
    /// No secondary metrics
    Empty,
    Circles { diameter: f32, spacing: f32 },
    Badges,
}

/// Decide circle sizes or the badge fallback for `count` metrics.
///
/// Spacing is given up first, down to `min_spacing`, with the saved width
/// going to the diameter (never above the default). A diameter under
/// `min_diameter` falls back to badges.
pub fn plan_secondary_row(available_width: f32, count: usize, sizing: &ScoreRowSizing) -> RowPlan {
    if count == 0 {
        return RowPlan::Empty;
    }
    if !(available_width > 0.0) {
        return RowPlan::Badges;
    }

    let n = count as f32;
    let gaps = n - 1.0;
    let required = n * sizing.diameter + gaps * sizing.spacing;
    if required <= available_width {
        return RowPlan::Circles {
            diameter: sizing.diameter,
            spacing: sizing.spacing,
        };
    }

    let spacing = if count > 1 {
        ((available_width - n * sizing.diameter) / gaps)
            .max(sizing.min_spacing)
            .min(sizing.spacing)
    } else {
        0.0
    };
    let diameter = ((available_width - gaps * spacing) / n).min(sizing.diameter);
    if diameter < sizing.min_diameter {
        RowPlan::Badges
    } else {
        RowPlan::Circles { diameter, spacing }
    }
}

/// Left edges of `count` circles starting at `start_x`
pub fn circle_lefts(start_x: f32, count: usize, diameter: f32, spacing: f32) -> Vec<f32> {
    (0..count)
        .map(|i| start_x + i as f32 * (diameter + spacing))
        .collect()
}

/// Label clip width: a little wider than the circle, never into a neighbor
pub fn circle_label_width(diameter: f32, spacing: f32) -> f32 {
    (diameter * 1.25).min(diameter + spacing)
}

fn badges_per_row(content_width: f32, sizing: &ScoreRowSizing) -> usize {
    let slot = sizing.badge_width + sizing.badge_spacing;
    if slot <= 0.0 {
        return 1;
    }
    (((content_width + sizing.badge_spacing) / slot).floor() as usize).max(1)
}

/// Badge rectangles for `count` metrics, centered on the content width and
/// wrapping when one row of fixed badges would not fit
pub fn badge_rects(count: usize, top: f32, content_left: f32, content_width: f32, sizing: &ScoreRowSizing) -> Vec<Rect> {
    let per_row = badges_per_row(content_width, sizing);
    let mut rects = Vec::with_capacity(count);
    let mut placed = 0;
    let mut row = 0;
    while placed < count {
        let in_row = per_row.min(count - placed);
        let row_width = in_row as f32 * sizing.badge_width + (in_row as f32 - 1.0) * sizing.badge_spacing;
        let start_x = content_left + (content_width - row_width) / 2.0;
        let y = top + row as f32 * (sizing.badge_height + sizing.badge_spacing);
        for i in 0..in_row {
            rects.push(Rect::new(
                start_x + i as f32 * (sizing.badge_width + sizing.badge_spacing),
                y,
                sizing.badge_width,
                sizing.badge_height,
            ));
        }
        placed += in_row;
        row += 1;
    }
    rects
}

/// Total height of the badge block for `count` metrics
pub fn badge_block_height(count: usize, content_width: f32, sizing: &ScoreRowSizing) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let per_row = badges_per_row(content_width, sizing);
    let rows = count.div_ceil(per_row) as f32;
    rows * sizing.badge_height + (rows - 1.0) * sizing.badge_spacing
}

/// Draw the primary score and its adaptive secondary row starting at `top`.
///
/// Returns the consumed height and the plan that was applied.
pub fn draw_score_row(
    painter: &mut Painter,
    top: f32,
    primary: &ScoredMetric,
    secondary: &[ScoredMetric],
) -> (f32, RowPlan) {
    let config = painter.config();
    let page = &config.page;
    let sizing = &config.score_row;

    let primary_left = page.content_left();
    let primary_d = sizing.primary_diameter;
    let primary_center = Point::new(primary_left + primary_d / 2.0, top + primary_d / 2.0);
    let primary_height = draw_score_circle(
        painter,
        primary_center,
        primary_d,
        true,
        primary,
        primary_d + sizing.primary_gap,
    );

    let row_left = primary_left + primary_d + sizing.primary_gap;
    let available = page.content_right() - row_left;
    let plan = plan_secondary_row(available, secondary.len(), sizing);
    tracing::debug!(
        available_width = available,
        metrics = secondary.len(),
        plan = ?plan,
        "secondary score row planned"
    );

    let height = match plan {
        RowPlan::Empty => primary_height,
        RowPlan::Circles { diameter, spacing } => {
            let label_width = circle_label_width(diameter, spacing);
            let mut tallest: f32 = 0.0;
            for (metric, left) in secondary.iter().zip(circle_lefts(row_left, secondary.len(), diameter, spacing)) {
                let center = Point::new(left + diameter / 2.0, primary_center.y);
                let block = draw_score_circle(painter, center, diameter, false, metric, label_width);
                // block is measured from the circle top, which sits above `top`
                tallest = tallest.max(center.y - diameter / 2.0 - top + block);
            }
            primary_height.max(tallest)
        }
        RowPlan::Badges => {
            let badge_top = top + primary_height + sizing.badge_spacing;
            let rects = badge_rects(secondary.len(), badge_top, page.content_left(), page.content_width(), sizing);
            for (metric, rect) in secondary.iter().zip(rects) {
                draw_score_badge(painter, rect, metric);
            }
            primary_height
                + sizing.badge_spacing
                + badge_block_height(secondary.len(), page.content_width(), sizing)
        }
    };

    (height, plan)
}
