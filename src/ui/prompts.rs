//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use crate::error::{Result, StackupError};

use super::{parse_yes, Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to StackupError.
fn map_dialoguer_err(e: dialoguer::Error) -> StackupError {
    StackupError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_yes).unwrap_or(true);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

/// Index of the option whose value is `default`, or the first option.
fn default_index(options: &[PromptOption], default: Option<&str>) -> usize {
    default
        .and_then(|d| options.iter().position(|o| o.value == d))
        .unwrap_or(0)
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_index(options, prompt.default.as_deref()))
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    let value = options
        .get(selection)
        .map(|o| o.value.clone())
        .unwrap_or_default();
    Ok(PromptResult::String(value))
}
