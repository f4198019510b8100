//! Model Prober
//!
//! Picks exactly one model for the run from a fixed preference list:
//! - cloud: first provider whose credential is present in the environment
//!   snapshot, with OpenAI as the designated fallback
//! - local: first preferred model reported by `ollama list`, falling back to
//!   the first listed model
//!
//! Selection is a pure function of its inputs and never retries.

pub mod cloud;
pub mod local;

pub use cloud::select_cloud_model;
pub use local::{ModelEnumerator, OllamaEnumerator, parse_model_listing, select_local_model};

use crate::domain::model::SelectedModel;

/// Outcome of a successful probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub model: SelectedModel,
    /// True when no preferred entry matched and the designated fallback was used
    pub fallback: bool,
}

impl Selection {
    #[must_use]
    pub fn preferred(model: SelectedModel) -> Self {
        Self {
            model,
            fallback: false,
        }
    }

    #[must_use]
    pub fn fallback(model: SelectedModel) -> Self {
        Self {
            model,
            fallback: true,
        }
    }
}
