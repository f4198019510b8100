//! Local Ollama model selection

use std::borrow::Cow;
use std::process::Command;

use super::Selection;
use crate::domain::model::provider::OLLAMA_PREFERENCES;
use crate::domain::model::{OptionExt, ProbeError, ProbeResult, SelectedModel};

/// Source of the local model listing
pub trait ModelEnumerator {
    /// Raw listing text, header line first
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::EnumeratorFailed` if the listing cannot be produced
    fn list_models(&self) -> ProbeResult<String>;
}

/// Runs `ollama list`
#[derive(Debug, Clone)]
pub struct OllamaEnumerator {
    program: String,
}

impl OllamaEnumerator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("ollama")
    }

    /// Use a different executable, e.g. an absolute path
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OllamaEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelEnumerator for OllamaEnumerator {
    fn list_models(&self) -> ProbeResult<String> {
        let output = Command::new(&self.program)
            .arg("list")
            .output()
            .map_err(|e| ProbeError::EnumeratorFailed(Cow::Owned(e.to_string())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::EnumeratorFailed(Cow::Owned(format!(
                "`{} list` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ))));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse `ollama list` output into model names
///
/// The first line is a column header and is skipped. Each remaining
/// non-blank line contributes its first whitespace-separated field.
#[must_use]
pub fn parse_model_listing(listing: &str) -> Vec<String> {
    listing
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Select the best available local model
///
/// # Errors
///
/// Returns `ProbeError::EnumeratorFailed` if the listing cannot be read and
/// `ProbeError::NoModelsAvailable` if it lists no models
pub fn select_local_model(enumerator: &impl ModelEnumerator) -> ProbeResult<Selection> {
    let available = parse_model_listing(&enumerator.list_models()?);
    log::debug!("Local models available: {available:?}");

    if let Some(preferred) = OLLAMA_PREFERENCES
        .iter()
        .find(|name| available.iter().any(|m| m.as_str() == **name))
    {
        log::info!("Selected Ollama model {preferred}");
        return Ok(Selection::preferred(SelectedModel::ollama(*preferred)));
    }

    let first = available.into_iter().next().or_no_models()?;
    log::info!("No preferred Ollama model installed, using {first}");
    Ok(Selection::fallback(SelectedModel::ollama(first)))
}
