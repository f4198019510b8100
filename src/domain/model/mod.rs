//! Provider catalog, selected model and selection errors

pub mod error;
pub mod provider;

pub use error::{OptionExt, ProbeError, ProbeResult};
pub use provider::{Provider, ProviderCandidate, SelectedModel};
