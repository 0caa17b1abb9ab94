//! Wellness Report
//!
//! An MCP server that renders one-page wellness reports.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use wellness_report::build_info;
use wellness_report::mcp::ReportService;
use wellness_report::output::default_report_dir;
use wellness_report::render::ReportConfig;
use wellness_report::report::ReportEngine;
use wellness_report::tools::status::StatusTracker;

/// Optional refresh interval for the status countdown, in minutes
const REFRESH_MINUTES_ENV: &str = "WELLNESS_REPORT_REFRESH_MINUTES";
/// Optional JSON file overriding the default report configuration
const CONFIG_ENV: &str = "WELLNESS_REPORT_CONFIG";

fn load_config() -> Result<ReportConfig, Box<dyn std::error::Error>> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            eprintln!("Report config: {}", path);
            let json = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&json)?)
        }
        Err(_) => Ok(ReportConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wellness_report=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Get report directory
    let output_dir = default_report_dir();
    eprintln!("Report directory: {}", output_dir.display());
    std::fs::create_dir_all(&output_dir)?;

    let config = load_config()?;

    let mut tracker = StatusTracker::new(output_dir.clone());
    if let Some(minutes) = std::env::var(REFRESH_MINUTES_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|m| *m > 0)
    {
        eprintln!("Refresh interval: {} minutes", minutes);
        tracker = tracker.with_refresh_interval(chrono::Duration::minutes(minutes));
    }

    // Create the report service
    let service = ReportService::new(output_dir, ReportEngine::new(config), tracker);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
