//! Non-interactive UI for CI/headless environments.
//!
//! Prompts never block. Each one is answered, in order, by:
//!
//! 1. a `STACKUP_PROMPT_<KEY>` environment variable
//! 2. `--yes`, for confirmations
//! 3. the prompt's default
//! 4. declining

use std::collections::HashMap;

use crate::error::Result;

use super::theme::StackupTheme;
use super::{
    parse_yes, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

const PROMPT_ENV_PREFIX: &str = "STACKUP_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    assume_yes: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading overrides from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            assume_yes: false,
        }
    }

    /// Answer confirmations with yes unless overridden.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    fn answer(&self, prompt: &Prompt, value: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_yes(value)),
            PromptType::Select { .. } => PromptResult::String(value.to_string()),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.env_overrides.get(&prompt.env_key()) {
            tracing::debug!("prompt '{}' answered from environment", prompt.key);
            return Ok(self.answer(prompt, value));
        }

        let result = match (&prompt.prompt_type, &prompt.default) {
            (PromptType::Confirm, _) if self.assume_yes => PromptResult::Bool(true),
            (_, Some(default)) => self.answer(prompt, default),
            (PromptType::Confirm, None) => PromptResult::Bool(false),
            (PromptType::Select { options }, None) => PromptResult::String(
                options.last().map(|o| o.value.clone()).unwrap_or_default(),
            ),
        };

        if self.mode.shows_status() {
            println!("{} {}", prompt.question, result.as_string());
        }
        Ok(result)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner {
            show: self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_document(&mut self, title: &str, body: &str) {
        if !self.mode.shows_status() {
            return;
        }
        let theme = StackupTheme::plain();
        println!("{}", theme.format_document_top(title));
        for line in body.lines() {
            println!("{}", theme.format_document_line(line));
        }
        println!("{}", theme.format_document_bottom());
    }

    fn open_url(&mut self, url: &str) -> Result<()> {
        // No browser in headless runs; print the link instead
        if self.mode.shows_status() {
            println!("Open {} in a browser", url);
        }
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its final line (for non-interactive mode).
struct NoopSpinner {
    show: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", StackupTheme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", StackupTheme::plain().format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("{}", StackupTheme::plain().format_skipped(msg));
        }
    }
}
