//! Conditional dependency install steps.

use std::path::Path;

use crate::profiles::{InstallCondition, InstallStep, Profile};
use crate::shell::TerminalDispatcher;

/// What happened to one install step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Condition did not hold; nobody was asked.
    Skipped,
    /// The user said no.
    Declined,
    /// Commands were handed to the dispatcher.
    Dispatched,
    /// The dispatcher could not start the commands.
    DispatchFailed(String),
}

/// Outcome of one install step, for reporting.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// The step's question
    pub prompt: String,
    /// The step's main command
    pub command: String,
    /// What happened
    pub outcome: StepOutcome,
}

/// Whether a step's condition holds in `workspace_root`.
pub fn condition_holds(step: &InstallStep, workspace_root: &Path) -> bool {
    match step.condition {
        InstallCondition::FileExists => workspace_root.join(&step.detection_file).exists(),
    }
}

/// Name of the execution context for a profile's install steps.
pub fn context_name(profile: &Profile) -> String {
    format!("{} Local Setup", profile.name)
}

/// Runs a profile's install steps through a terminal dispatcher.
///
/// Dispatch is fire-and-forget: a command that fails after it started is not
/// observed here.
pub struct DependencyInstaller<'a> {
    dispatcher: &'a mut dyn TerminalDispatcher,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(dispatcher: &'a mut dyn TerminalDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Evaluate every step in order.
    ///
    /// `confirm` receives a prompt key and the step's question; it is only
    /// called for steps whose condition holds.
    pub fn run(
        &mut self,
        profile: &Profile,
        workspace_root: &Path,
        confirm: &mut dyn FnMut(&str, &str) -> bool,
    ) -> Vec<StepReport> {
        let name = context_name(profile);
        let mut reports = Vec::with_capacity(profile.install_steps.len());

        for (index, step) in profile.install_steps.iter().enumerate() {
            let outcome = if !condition_holds(step, workspace_root) {
                tracing::debug!(
                    "skipping `{}`: {} not found",
                    step.command,
                    step.detection_file
                );
                StepOutcome::Skipped
            } else if !confirm(&format!("install_step_{}", index + 1), &step.prompt) {
                StepOutcome::Declined
            } else {
                match self
                    .dispatcher
                    .execute_in_terminal(&name, workspace_root, &step.commands())
                {
                    Ok(()) => StepOutcome::Dispatched,
                    Err(e) => {
                        tracing::warn!("could not dispatch `{}`: {}", step.command, e);
                        StepOutcome::DispatchFailed(e.to_string())
                    }
                }
            };

            reports.push(StepReport {
                prompt: step.prompt.clone(),
                command: step.command.clone(),
                outcome,
            });
        }

        reports
    }
}
