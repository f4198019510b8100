//! Cloud provider selection from credential presence

use super::Selection;
use crate::domain::model::provider::{CLOUD_PREFERENCES, OPENAI_FALLBACK};
use crate::domain::model::{ProbeError, ProbeResult, Provider, SelectedModel};
use crate::env::EnvSnapshot;

/// Select the best available cloud model
///
/// Providers are tried in declared order (Groq, then Cerebras). The first
/// provider whose credential is present yields the first entry of its
/// preference list. If neither is configured, `OPENAI_API_KEY` selects the
/// designated fallback model.
///
/// # Errors
///
/// Returns `ProbeError::NoCredentialsAvailable` if no credential variable is set
pub fn select_cloud_model(env: &EnvSnapshot) -> ProbeResult<Selection> {
    for (provider, candidates) in &CLOUD_PREFERENCES {
        // Availability is credential presence only; there is no per-model check.
        if let Some(candidate) = candidates.first()
            && let Some(key) = env.credential(candidate.credential_env)
        {
            log::info!("Selected {provider} model {}", candidate.model_id);
            return Ok(Selection::preferred(SelectedModel::from_candidate(
                candidate, key, *provider,
            )));
        }
    }

    if let Some(key) = env.credential(OPENAI_FALLBACK.credential_env) {
        log::info!("No preferred provider configured, using OpenAI fallback {}", OPENAI_FALLBACK.model_id);
        return Ok(Selection::fallback(SelectedModel::from_candidate(
            &OPENAI_FALLBACK,
            key,
            Provider::OpenAi,
        )));
    }

    let mut checked: Vec<&'static str> = CLOUD_PREFERENCES
        .iter()
        .filter_map(|(_, candidates)| candidates.first().map(|c| c.credential_env))
        .collect();
    checked.push(OPENAI_FALLBACK.credential_env);
    Err(ProbeError::NoCredentialsAvailable { checked })
}
