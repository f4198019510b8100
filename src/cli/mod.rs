//! Terminal front end: input handling, the interactive loop and the
//! start-up sequence used by the binaries

pub mod app;
pub mod handler;
pub mod interactive;
pub mod prompt;

pub use app::{AppOptions, EXIT_SETUP_FAILURE, EXIT_SUCCESS, run_cloud, run_local, run_profile};
pub use handler::{ContinueChoice, EXIT_KEYWORDS, InputHandler, InputHandlerResult, SKIP_KEYWORD};
pub use interactive::{InteractiveSession, SessionOutcome, truncate_preview};
pub use prompt::{PromptEvent, PromptSource, ScriptedPrompt, TerminalPrompt};
