//! Rendering primitives
//!
//! Page-space geometry, text measurement, configuration and the drawing
//! command recorder shared by the layout engine and the output sinks.

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod text;

pub use canvas::{Align, DrawCommand, Page, Painter, Stroke};
pub use config::{
    ChartSizing, FlowSizing, Labels, PageGeometry, Palette, ReportConfig, ScoreRowSizing, DEFAULT_DATE_FORMAT,
};
pub use geometry::{Point, Rect, Rgb};
pub use text::{FontSpec, FontStyle, HelveticaMetrics, TextMetrics, TextSize};
