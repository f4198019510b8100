//! Provider catalog and the selected-model record

use std::fmt;

/// Credential variable for Groq
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
/// Credential variable for Cerebras
pub const CEREBRAS_API_KEY: &str = "CEREBRAS_API_KEY";
/// Credential variable for the OpenAI fallback
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Alternate API base for Cerebras
pub const CEREBRAS_API_BASE: &str = "https://api.cerebras.ai/v1";
/// OpenAI-compatible endpoint of a local Ollama daemon
pub const OLLAMA_API_BASE: &str = "http://localhost:11434/v1";
/// Placeholder key sent to Ollama
pub const OLLAMA_API_KEY: &str = "ollama";

/// Named source of model inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Groq,
    Cerebras,
    OpenAi,
    Ollama,
}

impl Provider {
    /// Lowercase tag, also used as the routing prefix of cloud model ids
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Cerebras => "cerebras",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Endpoint used when the adapter config carries no explicit base URL
    #[must_use]
    pub const fn default_api_base(self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::Cerebras => CEREBRAS_API_BASE,
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Ollama => OLLAMA_API_BASE,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag().to_uppercase())
    }
}

/// One entry of a static preference list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCandidate {
    pub model_id: &'static str,
    pub credential_env: &'static str,
    pub api_base: Option<&'static str>,
}

impl ProviderCandidate {
    const fn new(model_id: &'static str, credential_env: &'static str) -> Self {
        Self {
            model_id,
            credential_env,
            api_base: None,
        }
    }

    const fn with_base(mut self, api_base: &'static str) -> Self {
        self.api_base = Some(api_base);
        self
    }
}

/// Groq models, best first
pub static GROQ_CANDIDATES: [ProviderCandidate; 4] = [
    ProviderCandidate::new("groq/llama-3.3-70b-versatile", GROQ_API_KEY),
    ProviderCandidate::new("groq/llama-3.1-70b-versatile", GROQ_API_KEY),
    ProviderCandidate::new("groq/mixtral-8x7b-32768", GROQ_API_KEY),
    ProviderCandidate::new("groq/llama-3.1-8b-instant", GROQ_API_KEY),
];

/// Cerebras models, best first
pub static CEREBRAS_CANDIDATES: [ProviderCandidate; 2] = [
    ProviderCandidate::new("cerebras/llama3.1-70b", CEREBRAS_API_KEY).with_base(CEREBRAS_API_BASE),
    ProviderCandidate::new("cerebras/llama3.1-8b", CEREBRAS_API_KEY).with_base(CEREBRAS_API_BASE),
];

/// Designated default used when no preferred provider has a credential
pub static OPENAI_FALLBACK: ProviderCandidate =
    ProviderCandidate::new("gpt-4o-mini", OPENAI_API_KEY);

/// Preferred cloud providers in declared order
pub static CLOUD_PREFERENCES: [(Provider, &[ProviderCandidate]); 2] = [
    (Provider::Groq, &GROQ_CANDIDATES),
    (Provider::Cerebras, &CEREBRAS_CANDIDATES),
];

/// Local Ollama models, best first
pub static OLLAMA_PREFERENCES: [&str; 5] = [
    "granite3.3:2b",
    "llama3.2:1b",
    "granite3.3:latest",
    "deepseek-r1:latest",
    "qwen3:latest",
];

/// Model picked for this run
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedModel {
    pub model_id: String,
    pub credential: String,
    pub provider: Provider,
    pub api_base: Option<String>,
}

impl SelectedModel {
    #[must_use]
    pub fn from_candidate(candidate: &ProviderCandidate, credential: &str, provider: Provider) -> Self {
        Self {
            model_id: candidate.model_id.to_string(),
            credential: credential.to_string(),
            provider,
            api_base: candidate.api_base.map(str::to_string),
        }
    }

    /// Local Ollama model; the key is a fixed placeholder
    #[must_use]
    pub fn ollama(model: impl Into<String>) -> Self {
        Self {
            model_id: model.into(),
            credential: OLLAMA_API_KEY.to_string(),
            provider: Provider::Ollama,
            api_base: Some(OLLAMA_API_BASE.to_string()),
        }
    }
}

// Keeps credentials out of logs.
impl fmt::Debug for SelectedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedModel")
            .field("model_id", &self.model_id)
            .field("credential", &"<redacted>")
            .field("provider", &self.provider)
            .field("api_base", &self.api_base)
            .finish()
    }
}
