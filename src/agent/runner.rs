//! Tool-calling agent loop
//!
//! Each query starts from a fresh transcript (system prompt + user query).
//! The model may request tool calls; every call is executed on the tool
//! server and its output appended to the transcript before asking again.
//! Tool failures are reported back to the model as tool output rather than
//! aborting the query.

use super::AgentError;
use super::completion::ChatModel;
use crate::domain::chat::{ChatMessage, ToolCall};
use crate::domain::tool::{ToolDescriptor, ToolInvoker};

/// Default instructions for the deliberation agent
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful, systematic analyst. \
For any non-trivial question, call the `deliberate` tool with an `input` argument \
(and an optional `context` argument) before answering, then use its analysis to \
write a clear, well-structured final answer. Answer directly when no tool is needed.";

/// Runs one query to completion
pub trait QueryRunner {
    fn run(&self, query: &str) -> impl std::future::Future<Output = Result<String, AgentError>>;
}

/// Agent combining a chat model with the tool server's tools
#[derive(Debug)]
pub struct DeliberationAgent<M, T> {
    model: M,
    tools: T,
    descriptors: Vec<ToolDescriptor>,
    system_prompt: String,
    max_steps: usize,
}

impl<M, T> DeliberationAgent<M, T>
where
    M: ChatModel,
    T: ToolInvoker,
{
    #[must_use]
    pub fn new(model: M, tools: T, descriptors: Vec<ToolDescriptor>, max_steps: usize) -> Self {
        Self {
            model,
            tools,
            descriptors,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_steps: max_steps.max(1),
        }
    }

    /// Tools offered to the model
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Answer `query`, calling tools as the model requests
    ///
    /// # Errors
    ///
    /// Returns `AgentError` if a completion request fails or the model is
    /// still calling tools after `max_steps` rounds
    pub async fn answer(&self, query: &str) -> Result<String, AgentError> {
        let mut transcript = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(query),
        ];

        for step in 1..=self.max_steps {
            let mut turn = self.model.complete(&transcript, &self.descriptors).await?;

            if turn.tool_calls.is_empty() {
                log::info!("Final answer after {step} step(s)");
                return Ok(turn.content.unwrap_or_default());
            }

            assign_missing_ids(&mut turn.tool_calls, step);
            let calls = turn.tool_calls.clone();
            transcript.push(turn.into_message());

            for call in &calls {
                let output = self.execute(call).await;
                transcript.push(ChatMessage::tool_result(call.id.clone(), output));
            }
        }

        Err(AgentError::StepLimit(self.max_steps))
    }

    async fn execute(&self, call: &ToolCall) -> String {
        let name = call.function.name.as_str();
        log::info!("Tool call {name} ({})", call.id);

        let arguments = match call.parsed_arguments() {
            Ok(arguments) => arguments,
            Err(e) => {
                log::warn!("Model sent malformed arguments for {name}: {e}");
                return format!("Error: invalid JSON arguments: {e}");
            }
        };

        match self.tools.call_tool(name, arguments).await {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Tool {name} failed: {e}");
                format!("Error: {e}")
            }
        }
    }
}

impl<M, T> QueryRunner for DeliberationAgent<M, T>
where
    M: ChatModel,
    T: ToolInvoker,
{
    async fn run(&self, query: &str) -> Result<String, AgentError> {
        self.answer(query).await
    }
}

fn assign_missing_ids(calls: &mut [ToolCall], step: usize) {
    for (idx, call) in calls.iter_mut().enumerate() {
        if call.id.is_empty() {
            call.id = format!("call_{step}_{idx}");
        }
    }
}
