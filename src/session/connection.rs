//! Scoped MCP connection to the deliberation server
//!
//! The connection owns the running client service and, through its
//! transport, the spawned server process. `close()` shuts the service down
//! gracefully; dropping the connection on any other path (error, early
//! return, interrupt) cancels the service and the child process is killed
//! with it.

use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::RunningService;
use rmcp::transport::TokioChildProcess;
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Value, json};
use tokio::process::Command;

use super::bootstrap::ServerConnectionDescriptor;
use crate::domain::tool::{ToolCallError, ToolDescriptor, ToolInvoker};

/// Failures while establishing the tool-server connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("MCP handshake failed: {0}")]
    Handshake(String),
    #[error("failed to list tools: {0}")]
    ListTools(String),
}

/// Live connection to the tool server
pub struct McpConnection {
    service: RunningService<RoleClient, ()>,
    tools: Vec<ToolDescriptor>,
}

impl McpConnection {
    /// Spawn the server, perform the handshake and fetch the tool registry
    ///
    /// The child receives exactly the descriptor's environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError` if the process cannot be spawned, the
    /// handshake fails, or the tool list cannot be retrieved
    pub async fn connect(descriptor: &ServerConnectionDescriptor) -> Result<Self, ConnectError> {
        let mut command = Command::new(&descriptor.command);
        command
            .args(&descriptor.args)
            .env_clear()
            .envs(descriptor.env.iter());

        log::info!("Spawning tool server: {}", descriptor.display_command());
        let transport = TokioChildProcess::new(command).map_err(|source| ConnectError::Spawn {
            command: descriptor.display_command(),
            source,
        })?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ConnectError::Handshake(e.to_string()))?;

        if let Some(info) = service.peer_info() {
            log::info!(
                "Connected to {} {}",
                info.server_info.name,
                info.server_info.version
            );
        }

        let tools = service
            .list_all_tools()
            .await
            .map_err(|e| ConnectError::ListTools(e.to_string()))?
            .iter()
            .map(ToolDescriptor::from)
            .collect();

        Ok(Self { service, tools })
    }

    /// Tool registry advertised by the server at connect time
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Shut the service down and reap the server process
    pub async fn close(self) {
        match self.service.cancel().await {
            Ok(reason) => log::debug!("Tool server connection closed: {reason:?}"),
            Err(e) => log::warn!("Tool server connection did not shut down cleanly: {e}"),
        }
    }

    fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }
}

impl ToolInvoker for McpConnection {
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolCallError> {
        if !self.has_tool(name) {
            return Err(ToolCallError::ToolNotFound(name.to_string()));
        }
        if !arguments.is_object() {
            return Err(ToolCallError::InvalidArguments(format!(
                "expected a JSON object, got {arguments}"
            )));
        }

        let params: CallToolRequestParam =
            serde_json::from_value(json!({ "name": name, "arguments": arguments }))
                .map_err(|e| ToolCallError::InvalidArguments(e.to_string()))?;

        log::debug!("Calling tool {name}");
        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|e| ToolCallError::McpClientError(e.to_string()))?;

        let text = call_result_text(&result);
        if result.is_error.unwrap_or(false) {
            return Err(ToolCallError::ToolError {
                name: name.to_string(),
                message: text,
            });
        }
        Ok(text)
    }
}

/// Flatten a `CallToolResult` into text for the model
fn call_result_text(result: &CallToolResult) -> String {
    let text = result
        .content
        .iter()
        .filter_map(|c| c.as_text())
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty()
        && let Some(structured) = &result.structured_content
    {
        return structured.to_string();
    }
    text
}
