//! Build stamp
//!
//! Version, build counter and build time baked in by `build.rs`. The stamp
//! is reported by the status tool and written into every PDF as its
//! producer, so a report can be traced back to the binary that drew it.

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD: Option<&str> = option_env!("WELLNESS_REPORT_BUILD");
const BUILT_AT: Option<&str> = option_env!("WELLNESS_REPORT_BUILT_AT");

/// Which build of the renderer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
    pub version: &'static str,
    pub build: u64,
    pub built_at: &'static str,
}

impl BuildStamp {
    pub fn current() -> Self {
        Self::parse(BUILD, BUILT_AT)
    }

    fn parse(build: Option<&str>, built_at: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build: build.and_then(|b| b.trim().parse().ok()).unwrap_or(0),
            built_at: built_at.unwrap_or("unknown"),
        }
    }

    /// PDF producer string, e.g. `wellness-report 1.0.0 (build 12)`
    pub fn producer(&self) -> String {
        format!("wellness-report {} (build {})", self.version, self.build)
    }
}

/// Startup banner on stderr; stdout carries the MCP stream
pub fn print_startup_banner() {
    let stamp = BuildStamp::current();
    eprintln!("===============================================");
    eprintln!("  Wellness Report {}", stamp.version);
    eprintln!("  Build {} | {}", stamp.build, stamp.built_at);
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stamp_falls_back() {
        let stamp = BuildStamp::parse(None, None);
        assert_eq!(stamp.build, 0);
        assert_eq!(stamp.built_at, "unknown");
        assert_eq!(BuildStamp::parse(Some("x7"), None).build, 0);
    }

    #[test]
    fn test_producer_names_the_build() {
        let stamp = BuildStamp::parse(Some("12"), Some("2026-09-15T08:30:00Z"));
        assert_eq!(stamp.producer(), format!("wellness-report {} (build 12)", VERSION));
    }

    #[test]
    fn test_build_script_stamp_is_present() {
        // build.rs always counts from 1
        assert!(BuildStamp::current().build >= 1);
        assert_ne!(BuildStamp::current().built_at, "unknown");
    }
}
