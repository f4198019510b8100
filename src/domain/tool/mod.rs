//! Tool Interface
//!
//! Tools are discovered on the remote MCP server and executed through it.
//! Users never call tools directly: they prompt naturally and the model
//! decides which tools to call, `OpenAI` function calling style.

pub mod descriptor;

pub use descriptor::{NO_DESCRIPTION, ToolDescriptor, format_tool_list, tool_names};

/// Executes a named tool with JSON arguments
///
/// Implemented by the live MCP connection; tests substitute fakes.
pub trait ToolInvoker {
    /// Call `name` with `arguments` and return the textual result
    fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> impl std::future::Future<Output = Result<String, ToolCallError>> + Send;
}

/// Tool execution error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolCallError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Tool '{name}' reported an error: {message}")]
    ToolError { name: String, message: String },
    #[error("MCP client error: {0}")]
    McpClientError(String),
}

impl<T: ToolInvoker + Sync> ToolInvoker for &T {
    fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> impl std::future::Future<Output = Result<String, ToolCallError>> + Send {
        (**self).call_tool(name, arguments)
    }
}
