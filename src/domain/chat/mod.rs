//! Chat transcript types

pub mod message;

pub use message::{AssistantTurn, ChatMessage, FunctionCall, ToolCall};
