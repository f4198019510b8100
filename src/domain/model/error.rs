//! Error types for model selection

use std::borrow::Cow;

/// Setup-fatal conditions raised while picking a model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// None of the provider credential variables is set
    #[error("No API keys found! Please set {}", .checked.join(", "))]
    NoCredentialsAvailable { checked: Vec<&'static str> },

    /// The local runtime reported no installed models
    #[error("No Ollama models found")]
    NoModelsAvailable,

    /// The local model enumerator could not be run or exited with failure
    #[error("Failed to get Ollama model list. Is Ollama installed and running? ({0})")]
    EnumeratorFailed(Cow<'static, str>),
}

impl ProbeError {
    /// Operator-facing remediation steps for this failure
    #[must_use]
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::NoCredentialsAvailable { .. } => &[
                "1. Get a Groq API key: https://console.groq.com/",
                "2. Get a Cerebras API key: https://inference.cerebras.ai/",
                "3. Set in .env file:",
                "   GROQ_API_KEY=your_groq_key",
                "   CEREBRAS_API_KEY=your_cerebras_key",
            ],
            Self::NoModelsAvailable | Self::EnumeratorFailed(_) => &[
                "1. Install Ollama: https://ollama.com/",
                "2. Pull a model: ollama pull granite3.3:2b",
                "3. Start Ollama: ollama serve",
            ],
        }
    }
}

/// Result type for model selection
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Extension trait for turning an empty lookup into a probe failure
pub trait OptionExt<T> {
    /// Convert `None` into [`ProbeError::NoModelsAvailable`]
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::NoModelsAvailable` if the Option is None
    fn or_no_models(self) -> ProbeResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_no_models(self) -> ProbeResult<T> {
        self.ok_or(ProbeError::NoModelsAvailable)
    }
}
