//! Output sinks
//!
//! Encoders that replay a rendered page as PDF or PNG, and the file writer
//! that puts the bytes on disk.

pub mod error;
pub mod file;
pub mod pdf;
pub mod preview;

pub use error::{ReportError, ReportResult};
pub use file::{
    default_report_dir, default_report_path, file_slug, generated_at, write_report_file, REPORT_DIR_ENV,
};
pub use pdf::{render_pdf, PdfMetadata};
pub use preview::{render_preview, DEFAULT_PREVIEW_SCALE};

use serde::{Deserialize, Serialize};

use crate::models::ReportSnapshot;
use crate::render::{Page, ReportConfig};

/// Encoded report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
        }
    }
}

/// Document title and date for a snapshot's PDF
pub fn pdf_metadata(config: &ReportConfig, snapshot: &ReportSnapshot) -> PdfMetadata {
    PdfMetadata::new(
        &format!("{} - {}", config.labels.title, snapshot.nickname),
        snapshot.period.end,
    )
}

/// Encode a rendered page in the requested format
pub fn encode_page(
    page: &Page,
    format: OutputFormat,
    config: &ReportConfig,
    snapshot: &ReportSnapshot,
    preview_scale: f32,
) -> ReportResult<Vec<u8>> {
    match format {
        OutputFormat::Pdf => render_pdf(page, &pdf_metadata(config, snapshot)),
        OutputFormat::Png => render_preview(page, preview_scale),
    }
}
