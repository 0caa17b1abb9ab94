//! Macro-nutrient pie chart
//!
//! Carbohydrate, protein and fat wedges in that order, starting at 12
//! o'clock and running clockwise, with a three-row legend beneath.

use crate::models::MacroDistribution;
use crate::render::{Align, FontSpec, Painter, Point, Rect, Rgb};

use super::{draw_no_data, percent, sanitize};

/// 12 o'clock in page space (y grows downward)
const START_DEG: f32 = -90.0;
const LEGEND_GAP: f32 = 6.0;
const SWATCH: f32 = 7.0;
const LEGEND_FONT_SIZE: f32 = 8.0;

/// Wedge sweeps in degrees (carbohydrate, protein, fat); `None` when the
/// total is zero or unusable
pub fn macro_sweeps(macros: &MacroDistribution) -> Option<[f32; 3]> {
    let parts = [
        sanitize(macros.carbohydrate),
        sanitize(macros.protein),
        sanitize(macros.fat),
    ];
    let total: f64 = parts.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let carb = parts[0] / total * 360.0;
    let protein = parts[1] / total * 360.0;
    // close the circle exactly
    let fat = if parts[2] > 0.0 { 360.0 - carb - protein } else { 0.0 };
    Some([carb as f32, protein as f32, fat.max(0.0) as f32])
}

/// Footprint of the pie plus legend, identical with or without data
pub fn macro_pie_height(painter: &Painter) -> f32 {
    let charts = &painter.config().charts;
    charts.pie_diameter + LEGEND_GAP + 3.0 * charts.legend_row_height
}

/// Draw the pie and legend into a block starting at `area.x, area.y` with
/// width `area.width`; returns the footprint height
pub fn draw_macro_pie(painter: &mut Painter, area: Rect, macros: Option<&MacroDistribution>) -> f32 {
    let height = macro_pie_height(painter);
    let footprint = Rect::new(area.x, area.y, area.width, height);

    let (macros, sweeps) = match macros.and_then(|m| macro_sweeps(m).map(|s| (m, s))) {
        Some(found) => found,
        None => return draw_no_data(painter, footprint),
    };

    let config = painter.config();
    let palette = &config.palette;
    let labels = &config.labels;
    let diameter = config.charts.pie_diameter;
    let center = Point::new(area.x + area.width / 2.0, area.y + diameter / 2.0);

    let colors = [palette.carbohydrate, palette.protein, palette.fat];
    let mut start = START_DEG;
    for (sweep, color) in sweeps.iter().zip(colors) {
        if *sweep > 0.0 {
            painter.wedge(center, diameter / 2.0, start, *sweep, color);
        }
        start += sweep;
    }

    let total = sanitize(macros.carbohydrate) + sanitize(macros.protein) + sanitize(macros.fat);
    let entries: [(&str, f64, Rgb); 3] = [
        (labels.carbohydrate.as_str(), macros.carbohydrate, palette.carbohydrate),
        (labels.protein.as_str(), macros.protein, palette.protein),
        (labels.fat.as_str(), macros.fat, palette.fat),
    ];
    let legend_left = area.x + (area.width - diameter) / 2.0;
    let mut y = area.y + diameter + LEGEND_GAP;
    for (label, value, color) in entries {
        painter.fill_rect(Rect::new(legend_left, y + 1.0, SWATCH, SWATCH), color);
        painter.text_clipped(
            &format!("{} {}%", label, percent(sanitize(value), total)),
            legend_left + SWATCH + 4.0,
            y + LEGEND_FONT_SIZE,
            FontSpec::regular(LEGEND_FONT_SIZE),
            palette.text,
            Align::Left,
            (area.right() - legend_left - SWATCH - 4.0).max(0.0),
        );
        y += config.charts.legend_row_height;
    }

    height
}
