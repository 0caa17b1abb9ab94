//! Wellness report MCP server implementation
//!
//! Implements the MCP server with the report tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::models::ReportSnapshot;
use crate::output::{OutputFormat, DEFAULT_PREVIEW_SCALE};
use crate::report::ReportEngine;
use crate::tools::reports::{self, GenerateReportResponse};
use crate::tools::status::StatusTracker;

/// Wellness report MCP service
#[derive(Clone)]
pub struct ReportService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    engine: Arc<ReportEngine>,
    output_dir: PathBuf,
    tool_router: ToolRouter<ReportService>,
}

impl ReportService {
    pub fn new(output_dir: PathBuf, engine: ReportEngine, status_tracker: StatusTracker) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(status_tracker)),
            engine: Arc::new(engine),
            output_dir,
            tool_router: Self::tool_router(),
        }
    }

    async fn render_to_file(
        &self,
        snapshot: serde_json::Value,
        format: OutputFormat,
        output_path: Option<String>,
        scale: f32,
    ) -> Result<CallToolResult, McpError> {
        let snapshot: ReportSnapshot = serde_json::from_value(snapshot)
            .map_err(|e| McpError::invalid_params(format!("Invalid snapshot: {}", e), None))?;

        let engine = Arc::clone(&self.engine);
        let output_dir = self.output_dir.clone();
        // rendering and encoding are CPU bound
        let result: Result<GenerateReportResponse, String> = tokio::task::spawn_blocking(move || {
            reports::generate_report(&engine, &snapshot, format, output_path.as_deref(), &output_dir, scale)
        })
        .await
        .map_err(|e| McpError::internal_error(format!("Render task failed: {}", e), None))?;
        let response = result.map_err(|e| McpError::internal_error(e, None))?;

        self.status_tracker.lock().await.record_report();

        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateReportParams {
    /// Report snapshot (see report_instructions for the shape)
    pub snapshot: serde_json::Value,
    /// Output file path; defaults to a generated name in the report directory
    pub output_path: Option<String>,
}

fn default_preview_scale() -> f32 {
    DEFAULT_PREVIEW_SCALE
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PreviewReportParams {
    /// Report snapshot (see report_instructions for the shape)
    pub snapshot: serde_json::Value,
    /// Output file path; defaults to a generated name in the report directory
    pub output_path: Option<String>,
    /// Pixels per point, 1.0 gives 612x792 (max 4.0)
    #[serde(default = "default_preview_scale")]
    pub scale: f32,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl ReportService {
    // --- Status ---

    #[tool(description = "Get the current status of the wellness report service including build info, report count, and process information")]
    async fn report_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the snapshot JSON shape and layout rules. Call this before building a snapshot for the first time.")]
    fn report_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::REPORT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(REPORT_INSTRUCTIONS)]))
    }

    // --- Reports ---

    #[tool(description = "Render a one-page wellness report PDF from a snapshot and write it to disk")]
    async fn generate_wellness_report(
        &self,
        Parameters(p): Parameters<GenerateReportParams>,
    ) -> Result<CallToolResult, McpError> {
        self.render_to_file(p.snapshot, OutputFormat::Pdf, p.output_path, DEFAULT_PREVIEW_SCALE)
            .await
    }

    #[tool(description = "Render the same page as a PNG preview to check the layout before generating the PDF")]
    async fn preview_wellness_report(
        &self,
        Parameters(p): Parameters<PreviewReportParams>,
    ) -> Result<CallToolResult, McpError> {
        self.render_to_file(p.snapshot, OutputFormat::Png, p.output_path, p.scale)
            .await
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ReportService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wellness-report".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Wellness Report".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Wellness Report - one-page PDF health summaries with adaptive score layout and AGP charts. \
                 IMPORTANT: Call report_instructions for the snapshot shape. \
                 Reports: generate_wellness_report (PDF), preview_wellness_report (PNG). \
                 Status: report_status."
                    .into(),
            ),
        }
    }
}
