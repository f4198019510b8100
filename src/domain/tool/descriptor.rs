//! Tool descriptors advertised by the MCP server
//!
//! Converts `rmcp::model::Tool` into a plain descriptor with an optional
//! description, and renders descriptors for display and for the
//! `OpenAI` function calling format.

use rmcp::model::Tool as ToolInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Shown for tools that carry no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Named tool exposed by the tool server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "empty_object_schema")]
    pub input_schema: Value,
}

fn empty_object_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

impl ToolDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            input_schema: empty_object_schema(),
        }
    }

    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Description, or [`NO_DESCRIPTION`] when the server sent none
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// `OpenAI` tools entry for this descriptor
    #[must_use]
    pub fn to_openai_function(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description.as_deref().unwrap_or(""),
                "parameters": self.input_schema
            }
        })
    }
}

impl From<&ToolInfo> for ToolDescriptor {
    fn from(tool: &ToolInfo) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.as_ref().map(ToString::to_string),
            input_schema: Value::Object(tool.input_schema.as_ref().clone()),
        }
    }
}

/// Format tools as a simple `- name: description` list
#[must_use]
pub fn format_tool_list(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|tool| format!("  - {}: {}", tool.name, tool.description_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names only, as printed right after connecting
#[must_use]
pub fn tool_names(tools: &[ToolDescriptor]) -> Vec<&str> {
    tools.iter().map(|t| t.name.as_str()).collect()
}
