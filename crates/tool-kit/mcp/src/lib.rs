//! MCP server integration for the catalog tool-kit.
//!
//! This crate provides [`RegistryServer`], an rmcp-backed server handler
//! that exposes every tool in a [`catalog_tool_core::ToolRegistry`].

mod server;

pub use server::RegistryServer;

// Re-export rmcp types for convenience
pub use rmcp::transport::stdio;
pub use rmcp::{ServerHandler, service::ServiceExt};
