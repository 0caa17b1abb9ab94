//! Report service status tool
//!
//! Provides runtime status information about the report service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use chrono::{DateTime, Utc};

use crate::build_info::BuildStamp;

use super::countdown::RefreshCountdown;

/// Usage guide for AI assistants building report snapshots
pub const REPORT_INSTRUCTIONS: &str = r#"
# Wellness Report Instructions

A report is rendered from one JSON snapshot. Only `nickname` and `period`
are required; every other block may be omitted and renders a "No data"
placeholder instead of failing.

## Snapshot shape

```json
{
  "nickname": "Sam",
  "period": { "start": "2026-09-01", "end": "2026-09-14" },
  "wellness": {
    "overall": 78,
    "components": [
      { "label": "Glucose", "score": 82 },
      { "label": "Sleep", "score": null }
    ]
  },
  "glucose": {
    "time_in_range": 72.0, "time_in_tight_range": 51.0,
    "time_below_range": 2.0, "time_above_range": 26.0,
    "coefficient_of_variation": 31.5, "mean_glucose": 7.1, "gmi": 6.4
  },
  "agp": {
    "hours": [0, 1, 2], "p10": [4.1, 4.0, 3.9], "p25": [5.0, 4.8, 4.6],
    "p50": [6.1, 5.9, 5.7], "p75": [7.4, 7.0, 6.8], "p90": [8.9, 8.5, 8.1]
  },
  "nutrition": {
    "meal_score": 74, "post_meal_success_rate": 65.0, "post_meal_peak": 9.2,
    "macros": { "carbohydrate": 0.46, "protein": 0.30, "fat": 0.24 },
    "energy": { "morning": 520, "midday": 760, "evening": 690, "night": 110 }
  },
  "activity": {
    "average_steps": 8432, "step_goal": 8000, "active_minutes": 41,
    "goal_achievement": { "5000": 13, "10000": 4 }
  },
  "sleep": {
    "score": 81, "average_duration_hours": 7.3, "efficiency": 88.0,
    "average_bedtime": "23:15"
  }
}
```

## Rules

- Scores are integers 0-100. 80+ is green, 60-79 orange, below 60 red.
  A null score renders gray with a dash.
- Percentages are 0-100, glucose values are mmol/L.
- AGP series must all have the same length as `hours` (0-23).
- Up to eight wellness components fit as full-size circles. Up to about
  fifteen shrink to fit; more switch the row to wrapped badges.
- Use `preview_wellness_report` to check the layout as PNG before
  generating the PDF with `generate_wellness_report`.
"#;

/// Runtime status of the report service
#[derive(Debug, Clone, Serialize)]
pub struct ReportServiceStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Output information
    pub output_dir: String,
    pub reports_generated: u64,
    pub last_report_at: Option<DateTime<Utc>>,
    pub minutes_until_refresh: Option<i64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    output_dir: PathBuf,
    reports_generated: u64,
    last_report_at: Option<DateTime<Utc>>,
    refresh_interval: Option<chrono::Duration>,
    countdown: Option<RefreshCountdown>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            output_dir,
            reports_generated: 0,
            last_report_at: None,
            refresh_interval: None,
            countdown: None,
        }
    }

    /// Count down to a refresh `interval` after each generated report
    pub fn with_refresh_interval(mut self, interval: chrono::Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Record a generated report. Restarts the refresh countdown when a
    /// refresh interval is configured, which needs a tokio runtime.
    pub fn record_report(&mut self) {
        let now = Utc::now();
        self.reports_generated += 1;
        self.last_report_at = Some(now);
        if let Some(interval) = self.refresh_interval {
            // dropping the previous countdown stops its task
            self.countdown = Some(RefreshCountdown::start(now, interval, std::time::Duration::from_secs(30)));
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ReportServiceStatus {
        let build = BuildStamp::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ReportServiceStatus {
            build_number: build.build,
            build_timestamp: build.built_at,
            version: build.version,
            output_dir: self.output_dir.display().to_string(),
            reports_generated: self.reports_generated,
            last_report_at: self.last_report_at,
            minutes_until_refresh: self.countdown.as_ref().map(|c| c.minutes()),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
