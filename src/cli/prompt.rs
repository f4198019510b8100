//! Line input from the operator
//!
//! `TerminalPrompt` uses `inquire` when attached to a terminal and falls
//! back to plain line reads for piped input, so end of input is observable.
//! `ScriptedPrompt` replays a fixed sequence of events.

use std::collections::VecDeque;
use std::io::{BufRead, IsTerminal, Write};

use inquire::InquireError;

/// Result of asking the operator for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Input stream closed
    Eof,
}

/// Source of operator input
pub trait PromptSource {
    fn read_line(&mut self, prompt: &str) -> PromptEvent;
}

/// Interactive terminal input
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
        }
    }

    fn read_tty(prompt: &str) -> PromptEvent {
        match inquire::Text::new(prompt).prompt() {
            Ok(line) => PromptEvent::Line(line),
            Err(InquireError::OperationInterrupted) => PromptEvent::Interrupted,
            // Esc behaves like an empty answer
            Err(InquireError::OperationCanceled) => PromptEvent::Line(String::new()),
            Err(e) => {
                log::warn!("Terminal prompt failed: {e}");
                PromptEvent::Eof
            }
        }
    }

    fn read_piped(prompt: &str) -> PromptEvent {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "{prompt} ");
        let _ = stdout.flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => PromptEvent::Eof,
            Ok(_) => PromptEvent::Line(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) => {
                log::warn!("Failed to read from stdin: {e}");
                PromptEvent::Eof
            }
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptSource for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> PromptEvent {
        if self.interactive {
            Self::read_tty(prompt)
        } else {
            Self::read_piped(prompt)
        }
    }
}

/// Replays queued events, then reports end of input
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    events: VecDeque<PromptEvent>,
    prompts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(events: impl IntoIterator<Item = PromptEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Queue plain lines
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| PromptEvent::Line(l.into())))
    }

    /// Prompts shown so far, in order
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl PromptSource for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> PromptEvent {
        self.prompts.push(prompt.to_string());
        self.events.pop_front().unwrap_or(PromptEvent::Eof)
    }
}
