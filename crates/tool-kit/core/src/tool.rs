//! The tool trait.

use crate::error::ToolError;
use futures::future::BoxFuture;

/// A named async operation callable by an orchestration host.
///
/// Input decoding and output encoding happen in the registry, so implementations
/// deal only in native types.
///
/// # Example
///
/// ```ignore
/// use catalog_tool_core::{BoxFuture, Tool, ToolError};
///
/// #[derive(Clone)]
/// struct EchoTool;
///
/// impl Tool for EchoTool {
///     type Input = EchoInput;
///     type Output = String;
///     const NAME: &'static str = "echo";
///     const DESCRIPTION: &'static str = "Repeat the message back";
///
///     fn call(&self, input: EchoInput) -> BoxFuture<'static, Result<String, ToolError>> {
///         Box::pin(async move { Ok(input.message) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Input type for the tool.
    type Input: Send + 'static;

    /// Output type for the tool.
    type Output: Send + 'static;

    /// Unique name identifying the tool.
    const NAME: &'static str;

    /// Human-readable description of what the tool does.
    const DESCRIPTION: &'static str;

    /// Execute the tool with the given input.
    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}
