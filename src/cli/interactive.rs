//! Interactive Loop
//!
//! Runs the profile's canned demo queries, then reads free-text questions
//! until an exit keyword, an interrupt, or end of input. Every query is
//! independent: a failed query is reported and the loop moves on.

use std::borrow::Cow;
use std::io::{self, Write};

use tokio_util::sync::CancellationToken;

use super::handler::{ContinueChoice, InputHandler, InputHandlerResult};
use super::prompt::{PromptEvent, PromptSource};
use crate::agent::{AgentError, QueryRunner};
use crate::config::{DemoProfile, ProfileKind};
use crate::domain::model::Provider;

/// How interactive mode ended; all of these are graceful
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Operator typed an exit keyword
    Exited,
    /// Input stream closed
    EndOfInput,
    /// Ctrl-C at a prompt or while a query was running
    Interrupted,
}

/// Result of running one query
#[derive(Debug)]
enum QueryOutcome {
    Answer(String),
    Failed(AgentError),
    Interrupted,
}

/// Shorten `text` to `max_chars` characters, marking the cut with `...`
#[must_use]
pub fn truncate_preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Demo phase followed by the read-evaluate-print loop
pub struct InteractiveSession<'a, R, P, W> {
    runner: &'a R,
    prompt: &'a mut P,
    out: &'a mut W,
    profile: &'a DemoProfile,
    provider: Provider,
    handler: InputHandler,
    shutdown: CancellationToken,
}

impl<'a, R, P, W> InteractiveSession<'a, R, P, W>
where
    R: QueryRunner,
    P: PromptSource,
    W: Write,
{
    pub fn new(
        runner: &'a R,
        prompt: &'a mut P,
        out: &'a mut W,
        profile: &'a DemoProfile,
        provider: Provider,
    ) -> Self {
        Self {
            runner,
            prompt,
            out,
            profile,
            provider,
            handler: InputHandler::new(profile.allow_skip),
            shutdown: CancellationToken::new(),
        }
    }

    /// Cancelled when the operator interrupts the process
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Run demos, then interactive mode
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the output fails
    pub async fn run(mut self) -> io::Result<SessionOutcome> {
        if self.run_demos().await? == Some(SessionOutcome::Interrupted) {
            return self.interrupted();
        }
        self.run_interactive().await
    }

    /// Canned queries; `Some(Interrupted)` stops the whole session
    async fn run_demos(&mut self) -> io::Result<Option<SessionOutcome>> {
        let total = self.profile.demo_queries.len();
        let profile = self.profile;

        for (idx, demo) in profile.demo_queries.iter().enumerate() {
            writeln!(self.out, "\n{}", demo.title)?;
            writeln!(self.out, "{}", "-".repeat(profile.demo_rule_width()))?;
            let query = match profile.query_preview_chars {
                Some(max) => truncate_preview(&demo.query, max),
                None => Cow::Borrowed(demo.query.as_str()),
            };
            writeln!(self.out, "Query: {query}")?;
            writeln!(self.out, "\n{}", profile.deliberating_line(self.provider))?;

            match self.execute(&demo.query).await {
                QueryOutcome::Answer(result) => {
                    writeln!(self.out, "\n✅ Deliberation completed!")?;
                    match profile.result_preview_chars {
                        Some(max) => {
                            writeln!(self.out, "Result Preview: {}", truncate_preview(&result, max))?;
                        }
                        None => writeln!(self.out, "Result: {result}")?,
                    }
                }
                QueryOutcome::Failed(e) => {
                    writeln!(self.out, "❌ Error during deliberation: {e}")?;
                    continue;
                }
                QueryOutcome::Interrupted => return Ok(Some(SessionOutcome::Interrupted)),
            }

            if idx + 1 < total {
                self.out.flush()?;
                match self.prompt.read_line(profile.continue_prompt()) {
                    PromptEvent::Line(answer) => {
                        if self.handler.continue_choice(&answer) == ContinueChoice::Skip {
                            break;
                        }
                    }
                    PromptEvent::Interrupted => return Ok(Some(SessionOutcome::Interrupted)),
                    PromptEvent::Eof => break,
                }
            }
        }
        Ok(None)
    }

    async fn run_interactive(&mut self) -> io::Result<SessionOutcome> {
        writeln!(self.out)?;
        for line in self.profile.interactive_header(self.provider) {
            writeln!(self.out, "{line}")?;
        }

        loop {
            if self.shutdown.is_cancelled() {
                return self.interrupted();
            }

            writeln!(self.out)?;
            self.out.flush()?;
            let prompt = self.profile.question_prompt(self.provider);
            let line = match self.prompt.read_line(&prompt) {
                PromptEvent::Line(line) => line,
                PromptEvent::Interrupted => return self.interrupted(),
                PromptEvent::Eof => {
                    writeln!(self.out, "\n{}", self.profile.farewell())?;
                    return Ok(SessionOutcome::EndOfInput);
                }
            };

            let query = match self.handler.handle(&line) {
                InputHandlerResult::Exit => {
                    writeln!(self.out, "{}", self.profile.farewell())?;
                    return Ok(SessionOutcome::Exited);
                }
                InputHandlerResult::Empty => continue,
                InputHandlerResult::Query(query) => query,
            };

            writeln!(self.out, "\n{}", self.profile.deliberating_line(self.provider))?;
            match self.execute(&query).await {
                QueryOutcome::Answer(result) => self.print_answer(&result)?,
                QueryOutcome::Failed(e) => writeln!(self.out, "❌ Error: {e}")?,
                QueryOutcome::Interrupted => return self.interrupted(),
            }
        }
    }

    fn print_answer(&mut self, result: &str) -> io::Result<()> {
        match self.profile.kind {
            ProfileKind::Cloud => {
                writeln!(self.out, "\n✅ {} Response:", self.provider)?;
                writeln!(self.out, "{}", "=".repeat(50))?;
                writeln!(self.out, "{result}")?;
                writeln!(self.out, "{}", "=".repeat(50))
            }
            ProfileKind::Local => writeln!(self.out, "\n✅ Response: {result}"),
        }
    }

    async fn execute(&mut self, query: &str) -> QueryOutcome {
        if self.shutdown.is_cancelled() {
            return QueryOutcome::Interrupted;
        }
        let _ = self.out.flush();

        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => QueryOutcome::Interrupted,
            result = self.runner.run(query) => match result {
                Ok(answer) => QueryOutcome::Answer(answer),
                Err(AgentError::Interrupted) => QueryOutcome::Interrupted,
                Err(e) => {
                    log::debug!("Query failed: {e}");
                    QueryOutcome::Failed(e)
                }
            },
        }
    }

    fn interrupted(&mut self) -> io::Result<SessionOutcome> {
        writeln!(
            self.out,
            "\n{}",
            self.profile.interrupted_farewell(self.provider)
        )?;
        Ok(SessionOutcome::Interrupted)
    }
}
