//! Report files on disk
//!
//! Output is written to a temporary sibling first and renamed into place,
//! so a failed write never leaves a half-written report behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Utc};

use crate::models::ReportSnapshot;

use super::error::ReportResult;

/// Environment variable naming the report output directory
pub const REPORT_DIR_ENV: &str = "WELLNESS_REPORT_DIR";

/// Report directory from the environment, or `reports/` next to the project
/// root when running from a cargo target directory
pub fn default_report_dir() -> PathBuf {
    std::env::var(REPORT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("reports");
            path
        })
}

/// Removes the temporary file unless the write was committed
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, committed: false }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "could not remove partial report file");
                }
            }
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{}.partial", name))
}

/// Write `bytes` to `path`, creating parent directories as needed
pub fn write_report_file(path: &Path, bytes: &[u8]) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let partial = PartialFile::new(partial_path(path));
    {
        let file = File::create(&partial.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(&partial.path, path)?;
    partial.commit();

    tracing::info!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(())
}

/// Lowercase ASCII slug of a nickname for use in file names
pub fn file_slug(nickname: &str) -> String {
    let mut slug = String::with_capacity(nickname.len());
    for c in nickname.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "report".to_string()
    } else {
        slug.to_string()
    }
}

/// Generation time stamped into report file names, always UTC
pub fn generated_at() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// `<dir>/wellness-<slug>-<start>-to-<end>-<generated>.<extension>`
pub fn default_report_path(
    dir: &Path,
    snapshot: &ReportSnapshot,
    generated_at: NaiveDateTime,
    extension: &str,
) -> PathBuf {
    dir.join(format!(
        "wellness-{}-{}-to-{}-{}.{}",
        file_slug(&snapshot.nickname),
        snapshot.period.start.format("%Y%m%d"),
        snapshot.period.end.format("%Y%m%d"),
        generated_at.format("%Y%m%dT%H%M%S"),
        extension
    ))
}
