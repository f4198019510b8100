//! Model adapter and the tool-calling agent

pub mod completion;
pub mod runner;

pub use completion::{ChatCompletionClient, ChatModel};
pub use runner::{DEFAULT_SYSTEM_PROMPT, DeliberationAgent, QueryRunner};

/// Per-query failures; the interactive loop reports them and continues
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Decode(String),
    #[error("agent stopped after {0} steps without a final answer")]
    StepLimit(usize),
    #[error("query interrupted")]
    Interrupted,
}
