//! Output error types

use thiserror::Error;

/// Errors raised while encoding or writing a rendered report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF encoding error: {0}")]
    Pdf(String),

    #[error("Preview rendering error: {0}")]
    Preview(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for output operations
pub type ReportResult<T> = Result<T, ReportError>;
