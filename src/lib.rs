//! Wellness Report Library
//!
//! Renders a read-only health snapshot into a single-page report: an
//! adaptive score row, glucose statistics with an AGP chart, nutrition and
//! activity sections, encoded as PDF or as a PNG preview.

pub mod build_info;
pub mod charts;
pub mod layout;
pub mod mcp;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod score;
pub mod tools;

pub use models::ReportSnapshot;
pub use output::{OutputFormat, ReportError, ReportResult};
pub use render::ReportConfig;
pub use report::{RenderedReport, ReportEngine};
