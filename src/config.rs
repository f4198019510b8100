//! Run profiles and optional file overrides
//!
//! Each binary starts from a fixed [`DemoProfile`] preset. An optional TOML
//! file may override the server launch, the agent step limit and the
//! request timeout:
//!
//! ```toml
//! max_steps = 8
//! request_timeout_secs = 180
//!
//! [server]
//! command = "npx"
//! args = ["@nbiish/gikendaasowin-aabajichiganan-mcp"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::model::Provider;

/// Published npm package of the deliberation server
pub const DELIBERATION_PACKAGE: &str = "@nbiish/gikendaasowin-aabajichiganan-mcp";

const CONFIG_DIR_NAME: &str = "deliberate-agent";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Command and arguments that start the tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLaunch {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ServerLaunch {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `npx` with the published package
    #[must_use]
    pub fn npx_package() -> Self {
        Self::new("npx", [DELIBERATION_PACKAGE])
    }

    /// `node` with a local build of the server
    ///
    /// A relative `entry_point` resolves against the working directory.
    #[must_use]
    pub fn local_build(entry_point: impl Into<String>) -> Self {
        Self::new("node", [entry_point.into()])
    }
}

/// Canned demo prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoQuery {
    pub title: String,
    pub query: String,
}

impl DemoQuery {
    pub fn new(title: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            query: query.into(),
        }
    }
}

/// Which binary the profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Cloud,
    Local,
}

/// Everything that differs between the cloud and local runs
#[derive(Debug, Clone)]
pub struct DemoProfile {
    pub kind: ProfileKind,
    pub banner: Vec<String>,
    pub server: ServerLaunch,
    pub max_steps: usize,
    pub request_timeout: Duration,
    pub demo_queries: Vec<DemoQuery>,
    /// Truncate echoed demo queries to this many characters
    pub query_preview_chars: Option<usize>,
    /// Truncate demo results to this many characters
    pub result_preview_chars: Option<usize>,
    /// Whether `skip` at the continue prompt jumps to interactive mode
    pub allow_skip: bool,
    pub usage_notes: Vec<String>,
    pub troubleshooting: Vec<String>,
}

impl DemoProfile {
    /// Groq / Cerebras / OpenAI profile
    #[must_use]
    pub fn cloud() -> Self {
        Self {
            kind: ProfileKind::Cloud,
            banner: vec![
                "◈──◆──◇ GROQ & CEREBRAS + GIKENDAASOWIN MCP DEMO ◇──◆──◈".to_string(),
                "🚀 High-Performance Cloud Inference + Advanced Deliberation".to_string(),
                "=".repeat(70),
            ],
            server: ServerLaunch::npx_package(),
            max_steps: 8,
            request_timeout: Duration::from_secs(180),
            demo_queries: vec![
                DemoQuery::new(
                    "🔬 Complex System Analysis",
                    "Use deliberation to analyze: I'm building a distributed microservices architecture for a fintech platform handling 1M+ daily transactions. What are the key architectural decisions I need to make regarding data consistency, security, scalability, and regulatory compliance? Please consider both technical and business factors.",
                ),
                DemoQuery::new(
                    "🧮 Multi-Variable Optimization Problem",
                    "Apply deliberation to this optimization scenario: A renewable energy company needs to decide optimal locations for 50 new solar farms across 3 states. Variables: land cost, solar irradiance, grid connectivity, local regulations, environmental impact, and 10-year ROI projections. Create a comprehensive decision framework.",
                ),
                DemoQuery::new(
                    "🎯 Strategic AI Implementation Plan",
                    "Use deliberation to design an AI adoption strategy for a traditional manufacturing company (500 employees, $100M revenue). Consider: current tech capabilities, workforce training, integration challenges, competitive advantages, ethical considerations, and phased implementation over 24 months.",
                ),
                DemoQuery::new(
                    "🚀 Innovation Framework Design",
                    "Apply deliberation to create an innovation management framework for identifying, evaluating, and implementing breakthrough technologies in the autonomous vehicle industry. Consider technical feasibility, market readiness, regulatory landscape, and competitive positioning.",
                ),
            ],
            query_preview_chars: Some(120),
            result_preview_chars: Some(300),
            allow_skip: true,
            usage_notes: vec![
                "  - Simplified: deliberate(input='Your question here')".to_string(),
                "  - With context: deliberate(input='Your question', context='Additional context')".to_string(),
                "  - Returns: 6-stage cognitive processing with strategy scoring (0.00-0.99)".to_string(),
                "  - Strategy threshold: ≥1.53 (solution + efficiency levels)".to_string(),
            ],
            troubleshooting: vec![
                format!("1. Ensure the package is published: npm view {DELIBERATION_PACKAGE}"),
                format!("2. Test npx directly: npx {DELIBERATION_PACKAGE}"),
                "3. Check network connectivity and npm registry access".to_string(),
                "4. Try clearing npm cache: npm cache clean --force".to_string(),
            ],
        }
    }

    /// Local Ollama profile
    #[must_use]
    pub fn local() -> Self {
        Self {
            kind: ProfileKind::Local,
            banner: vec![
                "🧠 Smolagents + Gikendaasowin-Aabajichiganan MCP Demo".to_string(),
                "🦬 Using Local Ollama Models for Privacy".to_string(),
                "=".repeat(60),
            ],
            server: ServerLaunch::local_build("build/index.js"),
            max_steps: 6,
            request_timeout: Duration::from_secs(600),
            demo_queries: vec![
                DemoQuery::new(
                    "🔬 Problem Analysis with Deliberation",
                    "Use the deliberation tool to analyze this problem: I need to choose between Python and JavaScript for a web scraping project. Consider factors like performance, ease of use, and library availability.",
                ),
                DemoQuery::new(
                    "🧮 Mathematical Reasoning",
                    "Please use deliberation to solve this step by step: If I save $500 per month at 5% annual interest compounded monthly, how much will I have after 3 years?",
                ),
                DemoQuery::new(
                    "🎯 Decision Framework",
                    "Use the deliberation tool to create a decision framework for choosing a laptop: budget $1000-1500, uses: coding, light gaming, portability important.",
                ),
            ],
            query_preview_chars: None,
            result_preview_chars: None,
            allow_skip: false,
            usage_notes: vec![
                "  - Correct: deliberate(input='Your question here')".to_string(),
                "  - With context: deliberate(input='Your question', context='Additional context')".to_string(),
                "  - Note: Returns detailed analysis using OOReDAct cognitive framework".to_string(),
            ],
            troubleshooting: vec![
                "1. Ensure Node.js is installed (node --version)".to_string(),
                format!(
                    "2. Check if the MCP package is available: npx {DELIBERATION_PACKAGE} --version"
                ),
                "3. Verify network connectivity for npx package downloads".to_string(),
            ],
        }
    }

    /// Apply overrides from a config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty server command or a zero step limit
    pub fn apply(&mut self, overrides: FileConfig) -> Result<(), ConfigError> {
        if let Some(server) = overrides.server {
            if server.command.trim().is_empty() {
                return Err(ConfigError::Invalid("server.command must not be empty".into()));
            }
            self.server = server;
        }
        if let Some(max_steps) = overrides.max_steps {
            if max_steps == 0 {
                return Err(ConfigError::Invalid("max_steps must be at least 1".into()));
            }
            self.max_steps = max_steps;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Prompt shown in interactive mode
    #[must_use]
    pub fn question_prompt(&self, provider: Provider) -> String {
        match self.kind {
            ProfileKind::Cloud => format!("🎯 Your question for {provider}:"),
            ProfileKind::Local => "🎯 Your question:".to_string(),
        }
    }

    /// Progress line printed before each query
    #[must_use]
    pub fn deliberating_line(&self, provider: Provider) -> String {
        match self.kind {
            ProfileKind::Cloud => format!("🤔 Agent deliberating with {provider}..."),
            ProfileKind::Local => "🤔 Agent deliberating...".to_string(),
        }
    }

    /// Question shown between demo queries
    #[must_use]
    pub fn continue_prompt(&self) -> &'static str {
        if self.allow_skip {
            "Press Enter to continue to next demo (or 'skip' to go to interactive mode)..."
        } else {
            "Press Enter to continue to next demo..."
        }
    }

    /// Width of the rule under each demo title
    #[must_use]
    pub fn demo_rule_width(&self) -> usize {
        match self.kind {
            ProfileKind::Cloud => 60,
            ProfileKind::Local => 50,
        }
    }

    /// Lines introducing interactive mode
    #[must_use]
    pub fn interactive_header(&self, provider: Provider) -> Vec<String> {
        match self.kind {
            ProfileKind::Cloud => vec![
                format!("🔄 Interactive Mode with {provider}"),
                "-".repeat(40),
                "Ask complex questions for the agent to deliberate on using advanced".to_string(),
                "cloud inference. Type 'quit' to exit.".to_string(),
            ],
            ProfileKind::Local => vec![
                "🔄 Interactive Mode".to_string(),
                "-".repeat(30),
                "You can now ask the agent any question. It will use the deliberation tool"
                    .to_string(),
                "to provide thoughtful, systematic analysis. Type 'quit' to exit.".to_string(),
            ],
        }
    }

    /// Farewell on exit keyword or end of input
    #[must_use]
    pub fn farewell(&self) -> &'static str {
        match self.kind {
            ProfileKind::Cloud => "👋 Thanks for using the cloud deliberation demo!",
            ProfileKind::Local => "👋 Thanks for using the deliberation demo!",
        }
    }

    /// Farewell on operator interrupt
    #[must_use]
    pub fn interrupted_farewell(&self, provider: Provider) -> String {
        match self.kind {
            ProfileKind::Cloud => format!("👋 Demo interrupted. Thanks for testing {provider}!"),
            ProfileKind::Local => "👋 Demo interrupted. Goodbye!".to_string(),
        }
    }
}

/// Optional overrides read from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<ServerLaunch>,
    pub max_steps: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

/// `$XDG_CONFIG_HOME/deliberate-agent/config.toml` or the platform equivalent
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse a config file
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read and
/// `ConfigError::Parse` if it is not valid TOML for [`FileConfig`]
pub fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load overrides from an explicit path, or from the default path if it exists
///
/// # Errors
///
/// An explicit path must exist and parse; a missing default file is not an error
pub fn load_overrides(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            log::debug!("Loading config overrides from {}", path.display());
            read_config_file(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}
