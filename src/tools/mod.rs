//! Report service tools
//!
//! MCP tool implementations for the wellness report service.

pub mod countdown;
pub mod reports;
pub mod status;
