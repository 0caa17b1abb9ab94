//! Drawing command recorder
//!
//! The layout engine never talks to a PDF or bitmap backend. It records a flat
//! list of [`DrawCommand`]s in page space; sinks replay that list later.

use serde::Serialize;

use super::config::ReportConfig;
use super::geometry::{Point, Rect, Rgb};
use super::text::{FontSpec, TextMetrics};

/// Outline pen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Rgb, width: f32) -> Self {
        Self { color, width }
    }
}

/// A single drawing operation in page space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        corner_radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Rgb,
    },
    /// Pie wedge, angles in degrees clockwise from 3 o'clock
    Wedge {
        center: Point,
        radius: f32,
        start_deg: f32,
        sweep_deg: f32,
        fill: Rgb,
    },
    Polygon {
        points: Vec<Point>,
        fill: Rgb,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    /// Single line of text; `origin` is the left end of the baseline
    Text {
        text: String,
        origin: Point,
        font: FontSpec,
        color: Rgb,
        /// Measured advance width, kept for sinks that cannot shape text
        width: f32,
    },
}

/// A finished page: fixed size plus its drawing commands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Command recorder bundled with the measurement and configuration every
/// drawing helper needs
pub struct Painter<'a> {
    commands: Vec<DrawCommand>,
    metrics: &'a dyn TextMetrics,
    config: &'a ReportConfig,
}

impl<'a> Painter<'a> {
    pub fn new(metrics: &'a dyn TextMetrics, config: &'a ReportConfig) -> Self {
        Self {
            commands: Vec::new(),
            metrics,
            config,
        }
    }

    pub fn config(&self) -> &'a ReportConfig {
        self.config
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_page(self) -> Page {
        Page {
            width: self.config.page.width,
            height: self.config.page.height,
            commands: self.commands,
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, fill: Rgb) {
        self.commands.push(DrawCommand::Rect {
            rect,
            corner_radius: 0.0,
            fill: Some(fill),
            stroke: None,
        });
    }

    pub fn rounded_rect(&mut self, rect: Rect, corner_radius: f32, fill: Option<Rgb>, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect {
            rect,
            corner_radius,
            fill,
            stroke,
        });
    }

    pub fn circle(&mut self, center: Point, radius: f32, fill: Rgb) {
        self.commands.push(DrawCommand::Circle { center, radius, fill });
    }

    pub fn wedge(&mut self, center: Point, radius: f32, start_deg: f32, sweep_deg: f32, fill: Rgb) {
        self.commands.push(DrawCommand::Wedge {
            center,
            radius,
            start_deg,
            sweep_deg,
            fill,
        });
    }

    pub fn polygon(&mut self, points: Vec<Point>, fill: Rgb) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Polygon { points, fill });
    }

    pub fn polyline(&mut self, points: Vec<Point>, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline { points, stroke });
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.polyline(vec![from, to], stroke);
    }

    /// Draw one line of text anchored at `x` on the baseline `y`.
    ///
    /// Returns the measured width.
    pub fn text(&mut self, text: &str, x: f32, baseline: f32, font: FontSpec, color: Rgb, align: Align) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let width = self.metrics.measure(text, font).width;
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin: Point::new(left, baseline),
            font,
            color,
            width,
        });
        width
    }

    /// Like [`Painter::text`], truncating with an ellipsis to `max_width`
    pub fn text_clipped(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        font: FontSpec,
        color: Rgb,
        align: Align,
        max_width: f32,
    ) -> f32 {
        let fitted = self.metrics.fit_to_width(text, font, max_width);
        self.text(&fitted, x, baseline, font, color, align)
    }
}
