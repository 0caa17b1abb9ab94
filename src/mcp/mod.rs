//! MCP server for wellness reports

mod server;

pub use server::ReportService;
