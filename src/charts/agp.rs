//! Ambulatory glucose profile chart
//!
//! Maps hour buckets [0, 23] and glucose [0, domain max] onto a fixed plot
//! rectangle with larger values higher on the page. Values outside the
//! domain are clamped to its edge, never dropped.

use crate::models::AgpSeries;
use crate::render::{Align, ChartSizing, FontSpec, Painter, Point, Rect, Stroke};

use super::draw_no_data;

const LAST_HOUR: i32 = 23;
const TICK_FONT_SIZE: f32 = 7.0;
const HOUR_TICKS: [i32; 5] = [0, 6, 12, 18, 23];

/// Domain-to-page mapping for one AGP plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgpScale {
    pub plot: Rect,
    pub domain_max: f64,
}

impl AgpScale {
    /// Plot rectangle inside `area`, leaving room for the tick labels
    pub fn new(area: Rect, sizing: &ChartSizing) -> Self {
        let plot = Rect::new(
            area.x + sizing.agp_axis_width,
            area.y + TICK_FONT_SIZE / 2.0,
            (area.width - sizing.agp_axis_width).max(0.0),
            (area.height - sizing.agp_tick_height - TICK_FONT_SIZE / 2.0).max(0.0),
        );
        Self {
            plot,
            domain_max: (sizing.agp_domain_max as f64).max(f64::EPSILON),
        }
    }

    pub fn x(&self, hour: i32) -> f32 {
        let h = hour.clamp(0, LAST_HOUR) as f32;
        self.plot.x + h / LAST_HOUR as f32 * self.plot.width
    }

    /// Page y for a glucose value; NaN sits on the domain floor
    pub fn y(&self, value: f64) -> f32 {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.domain_max)
        };
        self.plot.bottom() - (v / self.domain_max) as f32 * self.plot.height
    }

    fn point(&self, hour: i32, value: f64) -> Point {
        Point::new(self.x(hour), self.y(value))
    }

    /// Closed band: walk `upper` forward, then `lower` in reverse
    pub fn band(&self, hours: &[i32], upper: &[f64], lower: &[f64]) -> Vec<Point> {
        let mut points: Vec<Point> = hours
            .iter()
            .zip(upper)
            .map(|(h, v)| self.point(*h, *v))
            .collect();
        points.extend(hours.iter().zip(lower).rev().map(|(h, v)| self.point(*h, *v)));
        points
    }

    pub fn line(&self, hours: &[i32], values: &[f64]) -> Vec<Point> {
        hours
            .iter()
            .zip(values)
            .map(|(h, v)| self.point(*h, *v))
            .collect()
    }
}

fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn draw_axes(painter: &mut Painter, scale: &AgpScale) {
    let config = painter.config();
    let palette = &config.palette;
    let sizing = &config.charts;
    let plot = scale.plot;

    // target range band
    let top = scale.y(sizing.agp_target_high as f64);
    let bottom = scale.y(sizing.agp_target_low as f64);
    painter.fill_rect(
        Rect::new(plot.x, top, plot.width, (bottom - top).max(0.0)),
        palette.agp_target_band,
    );

    let axis = Stroke::new(palette.axis, 0.5);
    painter.line(Point::new(plot.x, plot.y), Point::new(plot.x, plot.bottom()), axis);
    painter.line(Point::new(plot.x, plot.bottom()), Point::new(plot.right(), plot.bottom()), axis);
}

fn draw_ticks(painter: &mut Painter, scale: &AgpScale) {
    let config = painter.config();
    let sizing = &config.charts;
    let color = config.palette.muted_text;
    let font = FontSpec::regular(TICK_FONT_SIZE);
    let plot = scale.plot;

    let values = [
        0.0,
        sizing.agp_target_low as f64,
        sizing.agp_target_high as f64,
        scale.domain_max,
    ];
    for value in values {
        painter.text(
            &tick_label(value),
            plot.x - 3.0,
            scale.y(value) + TICK_FONT_SIZE * 0.36,
            font,
            color,
            Align::Right,
        );
    }

    for hour in HOUR_TICKS {
        painter.text(
            &format!("{:02}:00", hour),
            scale.x(hour),
            plot.bottom() + TICK_FONT_SIZE + 3.0,
            font,
            color,
            Align::Center,
        );
    }
}

/// Draw the AGP chart into `area`; returns `area.height`.
///
/// No series (or an empty one) draws the placeholder. A series with fewer
/// than two points or mismatched lengths keeps the axes and target band but
/// skips the percentile bands and the median.
pub fn draw_agp_chart(painter: &mut Painter, area: Rect, series: Option<&AgpSeries>) -> f32 {
    let series = match series {
        Some(s) if !s.is_empty() => s,
        _ => return draw_no_data(painter, area),
    };

    let config = painter.config();
    let palette = &config.palette;
    let scale = AgpScale::new(area, &config.charts);

    draw_axes(painter, &scale);

    if series.is_drawable() {
        let hours = &series.hours;
        painter.polygon(scale.band(hours, &series.p90, &series.p10), palette.agp_outer_band);
        painter.polygon(scale.band(hours, &series.p75, &series.p25), palette.agp_inner_band);
        painter.polyline(
            scale.line(hours, &series.p50),
            Stroke::new(palette.agp_median, config.charts.agp_median_width),
        );
    } else {
        tracing::warn!(
            points = series.hours.len(),
            "AGP series too short or misaligned, drawing axes only"
        );
    }

    draw_ticks(painter, &scale);
    area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, HelveticaMetrics, ReportConfig};

    fn scale() -> AgpScale {
        AgpScale::new(Rect::new(0.0, 0.0, 324.0, 150.0), &ChartSizing::default())
    }

    fn series() -> AgpSeries {
        AgpSeries {
            hours: vec![0, 6, 12, 18, 23],
            p10: vec![3.5, 4.0, 4.8, 4.2, 3.8],
            p25: vec![4.5, 5.0, 5.9, 5.1, 4.6],
            p50: vec![5.8, 6.2, 7.4, 6.4, 5.9],
            p75: vec![7.0, 7.6, 9.1, 8.0, 7.2],
            p90: vec![8.4, 9.2, 11.5, 9.9, 8.8],
        }
    }

    #[test]
    fn test_values_clamp_to_domain() {
        let s = scale();
        assert_eq!(s.y(20.0), s.y(15.0));
        assert_eq!(s.y(-2.0), s.y(0.0));
        assert_eq!(s.y(0.0), s.plot.bottom());
        assert!((s.y(15.0) - s.plot.y).abs() < 1e-4);
        assert_eq!(s.y(f64::NAN), s.y(0.0));
    }

    #[test]
    fn test_hours_span_plot_width() {
        let s = scale();
        assert_eq!(s.x(0), s.plot.x);
        assert!((s.x(23) - s.plot.right()).abs() < 1e-4);
        assert_eq!(s.x(30), s.x(23));
        assert!(s.y(10.0) < s.y(3.9));
    }

    #[test]
    fn test_band_walks_upper_then_lower_reversed() {
        let s = scale();
        let band = s.band(&[0, 12, 23], &[9.0, 10.0, 11.0], &[4.0, 5.0, 6.0]);
        assert_eq!(band.len(), 6);
        assert_eq!(band[0], Point::new(s.x(0), s.y(9.0)));
        assert_eq!(band[2], Point::new(s.x(23), s.y(11.0)));
        assert_eq!(band[3], Point::new(s.x(23), s.y(6.0)));
        assert_eq!(band[5], Point::new(s.x(0), s.y(4.0)));
    }

    #[test]
    fn test_chart_draws_bands_back_to_front() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        let data = series();
        draw_agp_chart(&mut painter, Rect::new(0.0, 0.0, 324.0, 150.0), Some(&data));

        let fills: Vec<_> = painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { fill: Some(f), .. } => Some(*f),
                DrawCommand::Polygon { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                config.palette.agp_target_band,
                config.palette.agp_outer_band,
                config.palette.agp_inner_band
            ]
        );
        let median = painter.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Polyline { points, stroke } if points.len() == 5 && stroke.color == config.palette.agp_median
        ));
        assert!(median);
    }

    #[test]
    fn test_degenerate_series_keeps_axes_only() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        let mut data = series();
        data.p50.truncate(3);
        let height = draw_agp_chart(&mut painter, Rect::new(0.0, 0.0, 324.0, 150.0), Some(&data));
        assert_eq!(height, 150.0);
        assert!(!painter.commands().iter().any(|c| matches!(c, DrawCommand::Polygon { .. })));
        assert!(painter.commands().iter().any(|c| matches!(c, DrawCommand::Rect { .. })));
        let ticks = painter
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_missing_series_draws_placeholder() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        assert_eq!(draw_agp_chart(&mut painter, Rect::new(0.0, 0.0, 324.0, 150.0), None), 150.0);
        assert_eq!(painter.commands().len(), 1);

        let mut painter = Painter::new(&metrics, &config);
        draw_agp_chart(&mut painter, Rect::new(0.0, 0.0, 324.0, 150.0), Some(&AgpSeries::default()));
        assert_eq!(painter.commands().len(), 1);
    }
}
