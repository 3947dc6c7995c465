//! MCP server handler backed by ToolRegistry.

use catalog_tool_core::ToolRegistry;
use catalog_tool_core::registry::ErasedTool;
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use std::sync::Arc;
use tracing::{debug, warn};

/// MCP server handler backed by a [`ToolRegistry`].
///
/// Tool results are returned as a single text content holding pretty-printed
/// JSON. Failures inside a tool are the tool's business (they come back as
/// ordinary data); only dispatch failures such as an unknown tool name or
/// undecodable arguments produce an `is_error` result.
///
/// # Example
///
/// ```ignore
/// use catalog_tool_mcp::{RegistryServer, ServiceExt, stdio};
///
/// let server = RegistryServer::new(Arc::new(registry)).with_info("catalog-mcp", "0.1.0");
/// let service = server.serve(stdio()).await?;
/// service.waiting().await?;
/// ```
pub struct RegistryServer {
    registry: Arc<ToolRegistry>,
    name: String,
    version: String,
    instructions: Option<String>,
}

impl RegistryServer {
    /// Create a new server from a registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            name: "catalog-tools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    /// Set the server name and version.
    #[must_use]
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Set the instructions advertised to clients on initialize.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Describe every registered tool in MCP form.
    pub fn tool_list(&self) -> Vec<m::Tool> {
        self.registry.iter().map(|t| describe(t.as_ref())).collect()
    }

    /// Dispatch one call and wrap the outcome as an MCP result.
    pub async fn call(&self, name: &str, arguments: Option<m::JsonObject>) -> m::CallToolResult {
        let args = serde_json::Value::Object(arguments.unwrap_or_default());
        debug!(tool = name, "tool call");

        match self.registry.dispatch_json(name, args).await {
            Ok(data) => {
                let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
                m::CallToolResult::success(vec![m::Content::text(text)])
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool dispatch failed");
                m::CallToolResult::error(vec![m::Content::text(e.to_string())])
            }
        }
    }
}

fn describe(tool: &dyn ErasedTool) -> m::Tool {
    m::Tool {
        name: tool.name().into(),
        title: Some(tool.name().to_string()),
        description: Some(tool.description().into()),
        input_schema: Arc::new(tool.input_schema().clone()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
    }
}

#[expect(clippy::manual_async_fn, reason = "rmcp trait signatures return impl Future")]
impl ServerHandler for RegistryServer {
    fn initialize(
        &self,
        _params: m::InitializeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::InitializeResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::InitializeResult {
                server_info: m::Implementation {
                    name: self.name.clone(),
                    title: Some(self.name.clone()),
                    version: self.version.clone(),
                    website_url: None,
                    icons: None,
                },
                capabilities: m::ServerCapabilities::builder().enable_tools().build(),
                instructions: self.instructions.clone(),
                ..Default::default()
            })
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tool_list(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move { Ok(self.call(&req.name, req.arguments).await) }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_info_defaults_and_overrides() {
        let registry = Arc::new(ToolRegistry::builder().finish());
        let server = RegistryServer::new(Arc::clone(&registry));
        assert_eq!(server.name(), "catalog-tools");

        let server = RegistryServer::new(registry).with_info("my-server", "1.0.0");
        assert_eq!(server.name(), "my-server");
        assert_eq!(server.version(), "1.0.0");
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let server = RegistryServer::new(Arc::new(ToolRegistry::builder().finish()));
        assert!(server.tool_list().is_empty());
    }
}
