//! Classification of operator input

/// Keywords that end interactive mode, compared case-insensitively
pub const EXIT_KEYWORDS: [&str; 3] = ["quit", "exit", "q"];

/// Keyword accepted at the continue prompt to jump to interactive mode
pub const SKIP_KEYWORD: &str = "skip";

/// What to do with one line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputHandlerResult {
    /// Leave interactive mode
    Exit,
    /// Blank line, prompt again
    Empty,
    /// Send to the agent
    Query(String),
}

/// Answer at the "press Enter to continue" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    Continue,
    Skip,
}

/// Interprets lines read from the operator
#[derive(Debug, Clone)]
pub struct InputHandler {
    exit_keywords: Vec<String>,
    allow_skip: bool,
}

impl InputHandler {
    #[must_use]
    pub fn new(allow_skip: bool) -> Self {
        Self {
            exit_keywords: EXIT_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            allow_skip,
        }
    }

    /// Classify a line of interactive input
    #[must_use]
    pub fn handle(&self, input: &str) -> InputHandlerResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return InputHandlerResult::Empty;
        }
        let lowered = trimmed.to_lowercase();
        if self.exit_keywords.iter().any(|k| *k == lowered) {
            return InputHandlerResult::Exit;
        }
        InputHandlerResult::Query(trimmed.to_string())
    }

    /// Classify an answer to the continue prompt
    #[must_use]
    pub fn continue_choice(&self, input: &str) -> ContinueChoice {
        if self.allow_skip && input.trim().eq_ignore_ascii_case(SKIP_KEYWORD) {
            ContinueChoice::Skip
        } else {
            ContinueChoice::Continue
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(false)
    }
}
