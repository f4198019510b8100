//! Start-up sequence shared by both binaries
//!
//! Prober → Bootstrapper → scoped tool-server connection → Interactive Loop.
//! Setup failures are printed with remediation text and map to exit status
//! 1; every way out of the interactive loop maps to 0.

use std::io::{self, Write};
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use super::interactive::InteractiveSession;
use super::prompt::{PromptSource, TerminalPrompt};
use crate::agent::{ChatCompletionClient, DeliberationAgent};
use crate::config::{DemoProfile, ProfileKind, load_overrides};
use crate::domain::model::{ProbeResult, Provider};
use crate::domain::tool::{ToolDescriptor, format_tool_list, tool_names};
use crate::env::EnvSnapshot;
use crate::probe::{OllamaEnumerator, Selection, select_cloud_model, select_local_model};
use crate::session::{McpConnection, SessionBootstrapper};

/// Graceful termination
pub const EXIT_SUCCESS: u8 = 0;
/// Credential, model, config or connection setup failed
pub const EXIT_SETUP_FAILURE: u8 = 1;

/// Options accepted on the command line
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Explicit override file; otherwise the default location is tried
    pub config_path: Option<PathBuf>,
}

/// Cloud run: credentials from the environment, Groq / Cerebras / OpenAI
///
/// # Errors
///
/// Returns an error only if writing to stdout fails
pub async fn run_cloud(options: &AppOptions) -> io::Result<u8> {
    let mut prompt = TerminalPrompt::new();
    let mut out = io::stdout();
    run_profile(
        DemoProfile::cloud(),
        options,
        EnvSnapshot::capture(),
        select_cloud_model,
        &mut prompt,
        &mut out,
    )
    .await
}

/// Local run: a model installed in Ollama
///
/// # Errors
///
/// Returns an error only if writing to stdout fails
pub async fn run_local(options: &AppOptions) -> io::Result<u8> {
    let mut prompt = TerminalPrompt::new();
    let mut out = io::stdout();
    run_profile(
        DemoProfile::local(),
        options,
        EnvSnapshot::capture(),
        |_: &EnvSnapshot| select_local_model(&OllamaEnumerator::new()),
        &mut prompt,
        &mut out,
    )
    .await
}

/// Run a profile end to end and return the process exit status
///
/// # Errors
///
/// Returns an error only if writing to `out` fails
pub async fn run_profile<F, P, W>(
    mut profile: DemoProfile,
    options: &AppOptions,
    env: EnvSnapshot,
    probe: F,
    prompt: &mut P,
    out: &mut W,
) -> io::Result<u8>
where
    F: FnOnce(&EnvSnapshot) -> ProbeResult<Selection>,
    P: PromptSource,
    W: Write,
{
    let overrides = match load_overrides(options.config_path.as_deref()) {
        Ok(overrides) => overrides,
        Err(e) => {
            writeln!(out, "❌ Configuration error: {e}")?;
            return Ok(EXIT_SETUP_FAILURE);
        }
    };
    if let Err(e) = profile.apply(overrides) {
        writeln!(out, "❌ Configuration error: {e}")?;
        return Ok(EXIT_SETUP_FAILURE);
    }

    for line in &profile.banner {
        writeln!(out, "{line}")?;
    }

    let selection = match probe(&env) {
        Ok(selection) => selection,
        Err(e) => {
            let label = match profile.kind {
                ProfileKind::Cloud => "Cloud API",
                ProfileKind::Local => "Ollama",
            };
            writeln!(out, "❌ {label} setup error: {e}")?;
            writeln!(out, "\n🔧 Setup instructions:")?;
            for line in e.remediation() {
                writeln!(out, "{line}")?;
            }
            return Ok(EXIT_SETUP_FAILURE);
        }
    };
    writeln!(out, "{}", selection_line(&selection))?;

    let bootstrapper = SessionBootstrapper::new(profile.server.clone(), env);
    let (descriptor, adapter) = bootstrapper.bootstrap(&selection.model);
    let provider = adapter.provider;

    writeln!(
        out,
        "📡 Connecting to Gikendaasowin-Aabajichiganan MCP server ({})...",
        descriptor.display_command()
    )?;
    out.flush()?;

    let connection = match McpConnection::connect(&descriptor).await {
        Ok(connection) => connection,
        Err(e) => {
            log::error!("Tool server connection failed: {e}");
            writeln!(out, "❌ Failed to connect to MCP server: {e}")?;
            writeln!(out, "\n🔧 Troubleshooting tips:")?;
            for line in &profile.troubleshooting {
                writeln!(out, "{line}")?;
            }
            return Ok(EXIT_SETUP_FAILURE);
        }
    };
    writeln!(
        out,
        "✅ Connected! Available tools: [{}]",
        tool_names(connection.tools())
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ")
    )?;

    writeln!(out, "{}", initializing_line(profile.kind, provider, &adapter.model_id))?;
    let client = match ChatCompletionClient::new(adapter, profile.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            writeln!(out, "❌ Failed to initialize model client: {e}")?;
            connection.close().await;
            return Ok(EXIT_SETUP_FAILURE);
        }
    };

    let outcome = {
        let agent = DeliberationAgent::new(
            client,
            &connection,
            connection.tools().to_vec(),
            profile.max_steps,
        );
        print_capabilities(out, &profile, provider, agent.tools())?;

        let shutdown = CancellationToken::new();
        let listener = tokio::spawn(listen_for_interrupt(shutdown.clone()));

        let outcome = InteractiveSession::new(&agent, prompt, out, &profile, provider)
            .with_shutdown(shutdown)
            .run()
            .await;
        listener.abort();
        outcome
    };

    connection.close().await;
    let outcome = outcome?;
    log::info!("Session ended: {outcome:?}");
    Ok(EXIT_SUCCESS)
}

/// First Ctrl-C cancels the session; a second one exits immediately
async fn listen_for_interrupt(shutdown: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("Unable to listen for Ctrl-C");
        return;
    }
    log::info!("Interrupt received, shutting down");
    shutdown.cancel();

    // A blocking line read cannot observe the token until input arrives.
    if tokio::signal::ctrl_c().await.is_ok() {
        std::process::exit(i32::from(EXIT_SUCCESS));
    }
}

fn selection_line(selection: &Selection) -> String {
    let model = &selection.model.model_id;
    match (selection.model.provider, selection.fallback) {
        (Provider::Groq, _) => format!("🚀 Selected Groq model: {model}"),
        (Provider::Cerebras, _) => format!("🧠 Selected Cerebras model: {model}"),
        (Provider::OpenAi, _) => format!("⚠️  Using OpenAI fallback: {model}"),
        (Provider::Ollama, false) => format!("🎯 Selected Ollama model: {model}"),
        (Provider::Ollama, true) => format!("⚠️  Using fallback model: {model}"),
    }
}

fn initializing_line(kind: ProfileKind, provider: Provider, model_id: &str) -> String {
    match kind {
        ProfileKind::Cloud => format!("🔥 Initializing {provider} model ({model_id})..."),
        ProfileKind::Local => format!("🧠 Initializing Ollama model ({model_id})..."),
    }
}

fn print_capabilities<W: Write>(
    out: &mut W,
    profile: &DemoProfile,
    provider: Provider,
    tools: &[ToolDescriptor],
) -> io::Result<()> {
    match profile.kind {
        ProfileKind::Cloud => writeln!(
            out,
            "\n🤖 Agent initialized with {provider} + deliberation capabilities!"
        )?,
        ProfileKind::Local => writeln!(out, "\n🤖 Agent initialized with deliberation capabilities!")?,
    }
    writeln!(out, "Available capabilities:")?;
    if !tools.is_empty() {
        writeln!(out, "{}", format_tool_list(tools))?;
    }

    writeln!(out, "\n📚 Deliberate tool usage:")?;
    for line in &profile.usage_notes {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
