//! Report document
//!
//! Section drawing and the engine that stacks sections onto one page.

pub mod assembler;
pub mod sections;

pub use assembler::{LayoutSummary, RenderedReport, ReportEngine, Section, SectionExtent};
pub use sections::{format_date, group_thousands};
