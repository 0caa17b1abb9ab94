//! Energy distribution bars
//!
//! Four fixed horizontal bars, one per day segment, each as wide as that
//! segment's share of the day's energy and followed by its label and
//! integer percentage.

use crate::models::EnergyDistribution;
use crate::render::{Align, FontSpec, Painter, Rect};

use super::{draw_no_data, percent, sanitize};

const SEGMENTS: usize = 4;
const LABEL_FONT_SIZE: f32 = 8.0;
const LABEL_GAP: f32 = 6.0;

/// Segment shares (morning, midday, evening, night) in [0, 1]; `None` when
/// the total is zero or unusable
pub fn energy_shares(energy: &EnergyDistribution) -> Option<[f64; SEGMENTS]> {
    let parts = [
        sanitize(energy.morning),
        sanitize(energy.midday),
        sanitize(energy.evening),
        sanitize(energy.night),
    ];
    let total: f64 = parts.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    Some(parts.map(|p| p / total))
}

/// Footprint of the bar block, identical with or without data
pub fn energy_bars_height(painter: &Painter) -> f32 {
    let charts = &painter.config().charts;
    SEGMENTS as f32 * charts.bar_height + (SEGMENTS as f32 - 1.0) * charts.bar_spacing
}

/// Draw the bars into `area` (x, y and width are used); returns the height
pub fn draw_energy_bars(painter: &mut Painter, area: Rect, energy: Option<&EnergyDistribution>) -> f32 {
    let height = energy_bars_height(painter);
    let footprint = Rect::new(area.x, area.y, area.width, height);

    let (energy, shares) = match energy.and_then(|e| energy_shares(e).map(|s| (e, s))) {
        Some(found) => found,
        None => return draw_no_data(painter, footprint),
    };

    let config = painter.config();
    let palette = &config.palette;
    let labels = &config.labels;
    let charts = &config.charts;
    let max_width = (area.width - charts.bar_label_width).max(0.0);

    let total = sanitize(energy.morning) + sanitize(energy.midday) + sanitize(energy.evening) + sanitize(energy.night);
    let segments = [
        (&labels.morning, energy.morning, palette.morning),
        (&labels.midday, energy.midday, palette.midday),
        (&labels.evening, energy.evening, palette.evening),
        (&labels.night, energy.night, palette.night),
    ];

    let mut y = area.y;
    for ((label, value, color), share) in segments.into_iter().zip(shares) {
        let bar_width = (share as f32 * max_width).max(0.0);
        if bar_width > 0.0 {
            painter.fill_rect(Rect::new(area.x, y, bar_width, charts.bar_height), color);
        }
        painter.text_clipped(
            &format!("{} {}%", label, percent(sanitize(value), total)),
            area.x + bar_width + LABEL_GAP,
            y + charts.bar_height / 2.0 + LABEL_FONT_SIZE * 0.36,
            FontSpec::regular(LABEL_FONT_SIZE),
            palette.text,
            Align::Left,
            (area.right() - area.x - bar_width - LABEL_GAP).max(0.0),
        );
        y += charts.bar_height + charts.bar_spacing;
    }

    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, HelveticaMetrics, ReportConfig};

    #[test]
    fn test_equal_segments_share_a_quarter() {
        let shares = energy_shares(&EnergyDistribution::new(10.0, 10.0, 10.0, 10.0)).unwrap();
        assert_eq!(shares, [0.25; 4]);
    }

    #[test]
    fn test_zero_total_has_no_shares() {
        assert_eq!(energy_shares(&EnergyDistribution::default()), None);
    }

    #[test]
    fn test_equal_bars_show_twenty_five_percent() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        let energy = EnergyDistribution::new(10.0, 10.0, 10.0, 10.0);
        draw_energy_bars(&mut painter, Rect::new(300.0, 100.0, 262.0, 0.0), Some(&energy));

        let widths: Vec<f32> = painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(rect.width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!((widths[0] - (262.0 - 90.0) / 4.0).abs() < 1e-4);

        let labels: Vec<String> = painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Morning 25%", "Midday 25%", "Evening 25%", "Night 25%"]);
    }

    #[test]
    fn test_zero_energy_draws_placeholder() {
        let config = ReportConfig::default();
        let metrics = HelveticaMetrics;
        let mut painter = Painter::new(&metrics, &config);
        let height = draw_energy_bars(&mut painter, Rect::new(0.0, 0.0, 262.0, 0.0), Some(&EnergyDistribution::default()));
        assert_eq!(height, 4.0 * 14.0 + 3.0 * 8.0);
        assert_eq!(painter.commands().len(), 1);
        assert!(matches!(&painter.commands()[0], DrawCommand::Text { text, .. } if text == "No data"));
    }
}
