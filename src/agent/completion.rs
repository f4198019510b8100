//! `OpenAI`-compatible chat completion adapter
//!
//! Groq, Cerebras, OpenAI and Ollama all expose
//! `POST {base}/chat/completions` with bearer authentication and function
//! calling, so a single client covers every provider.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use super::AgentError;
use crate::domain::chat::{AssistantTurn, ChatMessage, ToolCall};
use crate::domain::tool::ToolDescriptor;
use crate::session::ModelAdapterConfig;

/// Produces the next assistant turn for a transcript
pub trait ChatModel {
    fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> impl std::future::Future<Output = Result<AssistantTurn, AgentError>> + Send;
}

impl<M: ChatModel + Sync> ChatModel for &M {
    fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> impl std::future::Future<Output = Result<AssistantTurn, AgentError>> + Send {
        (**self).complete(messages, tools)
    }
}

/// HTTP client for one provider endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
    config: ModelAdapterConfig,
}

impl ChatCompletionClient {
    /// # Errors
    ///
    /// Returns `AgentError::Http` if the HTTP client cannot be built
    pub fn new(config: ModelAdapterConfig, timeout: Duration) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint_base())
    }

    fn request_body(&self, messages: &[ChatMessage], tools: &[ToolDescriptor]) -> Value {
        let mut body = json!({
            "model": self.config.wire_model(),
            "messages": messages,
        });
        if !tools.is_empty() {
            body["tools"] = tools.iter().map(ToolDescriptor::to_openai_function).collect();
            body["tool_choice"] = json!("auto");
        }
        body
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

impl ChatModel for ChatCompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<AssistantTurn, AgentError> {
        let body = self.request_body(messages, tools);
        log::debug!(
            "POST {} ({} messages, {} tools)",
            self.url(),
            messages.len(),
            tools.len()
        );

        let response = self
            .http
            .post(self.url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Decode(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Decode("response contained no choices".to_string()))?;

        Ok(AssistantTurn {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}
