//! Deliberation agent demo
//!
//! Connects a tool-calling chat agent to the Gikendaasowin-Aabajichiganan
//! deliberation server over MCP stdio, backed either by a cloud inference
//! provider (Groq, Cerebras, OpenAI fallback) or by a local Ollama model.

/// Tool-calling agent and the chat completion adapter
pub mod agent;
/// Interactive front end and start-up sequence
pub mod cli;
/// Run profiles and config file overrides
pub mod config;
/// Chat, model and tool domain types
pub mod domain;
pub mod env;
/// Model selection
pub mod probe;
/// Session bootstrap and the MCP connection
pub mod session;

pub mod prelude {
    pub use crate::agent::{AgentError, ChatCompletionClient, ChatModel, DeliberationAgent, QueryRunner};
    pub use crate::cli::{AppOptions, InteractiveSession, SessionOutcome};
    pub use crate::config::{DemoProfile, FileConfig, ServerLaunch};
    pub use crate::domain::model::{ProbeError, Provider, SelectedModel};
    pub use crate::domain::tool::{ToolCallError, ToolDescriptor, ToolInvoker};
    pub use crate::env::EnvSnapshot;
    pub use crate::probe::{Selection, select_cloud_model, select_local_model};
    pub use crate::session::{McpConnection, ModelAdapterConfig, SessionBootstrapper};
}

pub use prelude::*;
