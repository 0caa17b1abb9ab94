//! Text measurement
//!
//! Layout never asks a rendering backend how big a string is. It goes through
//! the [`TextMetrics`] trait so tests can inject deterministic widths.

use serde::Serialize;

/// Font face used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Font face plus size in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub style: FontStyle,
    pub size: f32,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self { style: FontStyle::Regular, size }
    }

    pub fn bold(size: f32) -> Self {
        Self { style: FontStyle::Bold, size }
    }

    pub fn italic(size: f32) -> Self {
        Self { style: FontStyle::Italic, size }
    }
}

/// Measured extent of a single line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

const ELLIPSIS: &str = "...";

/// Text measurement capability injected into the layout engine
pub trait TextMetrics {
    /// Measure a single line of text
    fn measure(&self, text: &str, font: FontSpec) -> TextSize;

    /// Shorten `text` with a trailing ellipsis until it fits `max_width`.
    ///
    /// Returns the text unchanged when it already fits, and an empty string
    /// when not even the ellipsis fits.
    fn fit_to_width(&self, text: &str, font: FontSpec, max_width: f32) -> String {
        if self.measure(text, font).width <= max_width {
            return text.to_string();
        }
        let shortened = |end: usize| format!("{}{}", text[..end].trim_end(), ELLIPSIS);

        // byte offsets of every proper prefix with at least one char; widths
        // grow with the prefix, so the fitting ones form a leading run
        let ends: Vec<usize> = text.char_indices().map(|(i, _)| i).skip(1).collect();
        let fitting = ends.partition_point(|&end| self.measure(&shortened(end), font).width <= max_width);
        if fitting > 0 {
            return shortened(ends[fitting - 1]);
        }
        if self.measure(ELLIPSIS, font).width <= max_width {
            ELLIPSIS.to_string()
        } else {
            String::new()
        }
    }
}

// ============================================================================
// Helvetica Metrics
// ============================================================================

/// Advance widths (1/1000 em) for Helvetica, ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Bold faces run roughly this much wider than the regular face
const BOLD_WIDTH_FACTOR: f32 = 1.06;

/// Metrics for the PDF base-14 Helvetica family
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn advance(c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            HELVETICA_WIDTHS[(code - 32) as usize]
        } else {
            556
        }
    }
}

impl TextMetrics for HelveticaMetrics {
    fn measure(&self, text: &str, font: FontSpec) -> TextSize {
        let units: u32 = text.chars().map(|c| Self::advance(c) as u32).sum();
        let mut width = units as f32 / 1000.0 * font.size;
        if font.style == FontStyle::Bold {
            width *= BOLD_WIDTH_FACTOR;
        }
        TextSize {
            width,
            height: font.size,
        }
    }
}
