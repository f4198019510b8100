//! Session Bootstrapper
//!
//! Turns the selected model and the fixed server launch parameters into the
//! two configuration objects a session needs.

use std::fmt;

use crate::config::ServerLaunch;
use crate::domain::model::{Provider, SelectedModel};
use crate::env::EnvSnapshot;

/// How to start the tool server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConnectionDescriptor {
    pub command: String,
    pub args: Vec<String>,
    /// Exact environment of the spawned process
    pub env: EnvSnapshot,
}

impl ServerConnectionDescriptor {
    /// Command line for messages, e.g. `npx @scope/pkg`
    #[must_use]
    pub fn display_command(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Options recognised by the chat model adapter
#[derive(Clone, PartialEq, Eq)]
pub struct ModelAdapterConfig {
    pub provider: Provider,
    pub model_id: String,
    pub api_key: String,
    /// Alternate API base; set only where the provider needs one
    pub api_base: Option<String>,
}

impl ModelAdapterConfig {
    /// Base URL requests are sent to
    #[must_use]
    pub fn endpoint_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_base())
            .trim_end_matches('/')
    }

    /// Model name as the provider API expects it
    ///
    /// Cloud ids carry a routing prefix (`groq/…`, `cerebras/…`) that the
    /// provider itself does not know about.
    #[must_use]
    pub fn wire_model(&self) -> &str {
        let prefix = self.provider.tag();
        self.model_id
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.model_id)
    }
}

impl fmt::Debug for ModelAdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapterConfig")
            .field("provider", &self.provider)
            .field("model_id", &self.model_id)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Builds connection descriptors and adapter configs
#[derive(Debug, Clone)]
pub struct SessionBootstrapper {
    launch: ServerLaunch,
    env: EnvSnapshot,
}

impl SessionBootstrapper {
    #[must_use]
    pub fn new(launch: ServerLaunch, env: EnvSnapshot) -> Self {
        Self { launch, env }
    }

    #[must_use]
    pub fn server_descriptor(&self) -> ServerConnectionDescriptor {
        ServerConnectionDescriptor {
            command: self.launch.command.clone(),
            args: self.launch.args.clone(),
            env: self.env.clone(),
        }
    }

    #[must_use]
    pub fn adapter_config(&self, model: &SelectedModel) -> ModelAdapterConfig {
        ModelAdapterConfig {
            provider: model.provider,
            model_id: model.model_id.clone(),
            api_key: model.credential.clone(),
            api_base: model.api_base.clone(),
        }
    }

    /// Both halves at once
    #[must_use]
    pub fn bootstrap(
        &self,
        model: &SelectedModel,
    ) -> (ServerConnectionDescriptor, ModelAdapterConfig) {
        (self.server_descriptor(), self.adapter_config(model))
    }
}
