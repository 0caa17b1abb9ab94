//! Chart renderer
//!
//! Percentile-band AGP chart, macro pie and energy bars. Every chart keeps
//! the same footprint whether it has data or not: missing or degenerate input
//! draws an italic "no data" message in the space the chart would occupy.

pub mod agp;
pub mod energy;
pub mod pie;

pub use agp::{draw_agp_chart, AgpScale};
pub use energy::{draw_energy_bars, energy_bars_height, energy_shares};
pub use pie::{draw_macro_pie, macro_pie_height, macro_sweeps};

use crate::render::{Align, FontSpec, Painter, Rect};

const NO_DATA_FONT_SIZE: f32 = 9.0;

/// Draw the "no data" placeholder centered in `area`; returns `area.height`
pub fn draw_no_data(painter: &mut Painter, area: Rect) -> f32 {
    let config = painter.config();
    let font = FontSpec::italic(NO_DATA_FONT_SIZE);
    let center = area.center();
    painter.text_clipped(
        &config.labels.no_data,
        center.x,
        center.y + font.size * 0.36,
        font,
        config.palette.muted_text,
        Align::Center,
        area.width,
    );
    area.height
}

/// Integer percentage of `part` in `total`, 0 when the total is unusable
pub fn percent(part: f64, total: f64) -> i64 {
    if total > 0.0 && part.is_finite() {
        (part / total * 100.0).round() as i64
    } else {
        0
    }
}

/// Negative and non-finite components count as zero
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, FontStyle, HelveticaMetrics, ReportConfig};

    #[test]
    fn test_no_data_is_italic_and_keeps_footprint() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        let area = Rect::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(draw_no_data(&mut painter, area), 150.0);
        match &painter.commands()[0] {
            DrawCommand::Text { text, font, origin, .. } => {
                assert_eq!(text, "No data");
                assert_eq!(font.style, FontStyle::Italic);
                assert!(origin.y > area.y && origin.y < area.bottom());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_percent_guards_zero_total() {
        assert_eq!(percent(1.0, 0.0), 0);
        assert_eq!(percent(1.0, 3.0), 33);
        assert_eq!(percent(2.0, 3.0), 67);
    }
}
