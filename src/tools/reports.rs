//! Report generation tools
//!
//! Render a snapshot and write it to disk as a PDF report or a PNG preview.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::layout::RowPlan;
use crate::models::ReportSnapshot;
use crate::output::{
    default_report_path, encode_page, generated_at, write_report_file, OutputFormat, ReportResult,
};
use crate::report::{format_date, ReportEngine};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub format: OutputFormat,
    pub bytes_written: usize,
    pub date_range: String,
    /// How the wellness components were laid out
    pub secondary_row: RowPlan,
    /// Points of content clipped at the bottom margin
    pub overflow_points: f32,
    pub message: String,
}

// ============================================================================
// Generation
// ============================================================================

/// Output path: the requested one, or a generated name in `default_dir`
fn resolve_output_path(
    output_path: Option<&str>,
    default_dir: &Path,
    snapshot: &ReportSnapshot,
    format: OutputFormat,
) -> PathBuf {
    match output_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => default_report_path(default_dir, snapshot, generated_at(), format.extension()),
    }
}

fn write_report(
    engine: &ReportEngine,
    snapshot: &ReportSnapshot,
    format: OutputFormat,
    path: &Path,
    preview_scale: f32,
) -> ReportResult<GenerateReportResponse> {
    let rendered = engine.render(snapshot);
    let bytes = encode_page(&rendered.page, format, engine.config(), snapshot, preview_scale)?;
    write_report_file(path, &bytes)?;

    let pattern = engine.config().date_format();
    let date_range = format!(
        "{} to {}",
        format_date(snapshot.period.start, pattern),
        format_date(snapshot.period.end, pattern)
    );
    let mut message = format!(
        "Wellness {} generated for {} ({})",
        match format {
            OutputFormat::Pdf => "report",
            OutputFormat::Png => "preview",
        },
        snapshot.nickname,
        date_range
    );
    if rendered.layout.overflow > 0.0 {
        message.push_str(&format!(
            "; content exceeded the page by {:.0} pt and was clipped",
            rendered.layout.overflow
        ));
    }

    Ok(GenerateReportResponse {
        success: true,
        file_path: path.display().to_string(),
        format,
        bytes_written: bytes.len(),
        date_range,
        secondary_row: rendered.layout.secondary_row,
        overflow_points: rendered.layout.overflow,
        message,
    })
}

/// Render `snapshot` and write it in `format`
pub fn generate_report(
    engine: &ReportEngine,
    snapshot: &ReportSnapshot,
    format: OutputFormat,
    output_path: Option<&str>,
    default_dir: &Path,
    preview_scale: f32,
) -> Result<GenerateReportResponse, String> {
    let path = resolve_output_path(output_path, default_dir, snapshot, format);
    write_report(engine, snapshot, format, &path, preview_scale).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "report generation failed");
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;

    fn snapshot() -> ReportSnapshot {
        ReportSnapshot::empty(
            "Sam",
            DateRange::new(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            ),
        )
    }

    #[test]
    fn test_generates_into_default_dir() {
        let dir = std::env::temp_dir().join(format!("wellness-report-tool-{}", std::process::id()));
        let engine = ReportEngine::default();
        let response = generate_report(&engine, &snapshot(), OutputFormat::Png, None, &dir, 0.5).unwrap();

        assert!(response.success);
        assert!(response.file_path.ends_with(".png"));
        assert!(response.file_path.contains("wellness-sam-20260901-to-20260914"));
        assert_eq!(response.date_range, "Sep 1, 2026 to Sep 14, 2026");
        assert_eq!(response.secondary_row, RowPlan::Empty);
        assert_eq!(
            std::fs::metadata(&response.file_path).unwrap().len() as usize,
            response.bytes_written
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_output_path(Some(" /tmp/out.pdf "), Path::new("/ignored"), &snapshot(), OutputFormat::Pdf);
        assert_eq!(path, PathBuf::from("/tmp/out.pdf"));
        let path = resolve_output_path(Some(""), Path::new("/reports"), &snapshot(), OutputFormat::Pdf);
        assert!(path.starts_with("/reports"));
    }

    #[test]
    fn test_unwritable_path_reports_error() {
        let dir = std::env::temp_dir().join(format!("wellness-report-tool-blocked-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let target = blocker.join("report.pdf");

        let engine = ReportEngine::default();
        let result = generate_report(
            &engine,
            &snapshot(),
            OutputFormat::Pdf,
            target.to_str(),
            &dir,
            1.0,
        );
        assert!(result.is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
