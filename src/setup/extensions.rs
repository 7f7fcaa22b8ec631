//! Editor extension recommendations.

use std::collections::BTreeSet;

use crate::error::{Result, StackupError};
use crate::profiles::Profile;
use crate::shell::{execute, CommandOptions};
use crate::ui::UserInterface;

/// The editor's installed extensions.
pub trait ExtensionHost {
    /// Installed extension ids, lowercased.
    fn list_installed(&self) -> Result<BTreeSet<String>>;

    /// Install the given extensions.
    fn install(&mut self, ids: &[String]) -> Result<()>;
}

/// Extension host driven through the editor's command line (`code`).
#[derive(Debug, Clone)]
pub struct EditorCli {
    command: String,
    timeout_secs: Option<u64>,
}

impl EditorCli {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            timeout_secs: None,
        }
    }

    /// Bound how long listing installed extensions may take.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn failure(&self, message: String) -> StackupError {
        StackupError::Collaborator {
            collaborator: format!("`{}`", self.command),
            message,
        }
    }
}

impl ExtensionHost for EditorCli {
    fn list_installed(&self) -> Result<BTreeSet<String>> {
        let options = CommandOptions {
            timeout: self.timeout_secs,
            ..Default::default()
        };
        let result = execute(&format!("{} --list-extensions", self.command), &options)?;
        if !result.success {
            return Err(self.failure(result.combined_output().trim().to_string()));
        }
        Ok(parse_extension_list(&result.stdout))
    }

    fn install(&mut self, ids: &[String]) -> Result<()> {
        let mut failed = Vec::new();
        for id in ids {
            let command = format!("{} --install-extension {}", self.command, id);
            match execute(&command, &CommandOptions::default()) {
                Ok(result) if result.success => tracing::debug!("installed extension {}", id),
                Ok(result) => {
                    tracing::debug!("{} exited with {:?}", command, result.exit_code);
                    failed.push(id.clone());
                }
                Err(e) => {
                    tracing::debug!("{} failed: {}", command, e);
                    failed.push(id.clone());
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(self.failure(format!("could not install {}", failed.join(", "))))
        }
    }
}

/// Parse `--list-extensions` output (one id per line, optional `@version`).
pub fn parse_extension_list(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split('@').next().unwrap_or(line).to_lowercase())
        .collect()
}

/// Recommended extensions not yet installed, in recommendation order.
pub fn missing_extensions(recommended: &[String], installed: &BTreeSet<String>) -> Vec<String> {
    recommended
        .iter()
        .filter(|id| !installed.contains(&id.to_lowercase()))
        .cloned()
        .collect()
}

/// Result of the extension step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// The profile recommends nothing.
    NoneRecommended,
    /// Everything recommended is already there.
    AllInstalled,
    /// These were installed.
    Installed(Vec<String>),
    /// The user declined these.
    Declined(Vec<String>),
    /// Installing these failed.
    Failed(Vec<String>),
}

/// Offer to install the profile's missing extensions.
///
/// Host and prompt failures degrade to a warning; the step never fails.
pub fn recommend_extensions(
    profile: &Profile,
    host: &mut dyn ExtensionHost,
    ui: &mut dyn UserInterface,
) -> ExtensionOutcome {
    if profile.extensions.is_empty() {
        return ExtensionOutcome::NoneRecommended;
    }

    let installed = host.list_installed().unwrap_or_else(|e| {
        tracing::debug!("could not list installed extensions: {}", e);
        BTreeSet::new()
    });

    let missing = missing_extensions(&profile.extensions, &installed);
    if missing.is_empty() {
        ui.success("All recommended extensions are already installed.");
        return ExtensionOutcome::AllInstalled;
    }

    let question = format!(
        "Recommended extensions for this project: {}. Do you want to install them?",
        missing.join(", ")
    );
    let confirmed = match ui.confirm("install_extensions", &question, false) {
        Ok(answer) => answer,
        Err(e) => {
            ui.warning(&format!("Could not ask about extensions: {}", e));
            false
        }
    };
    if !confirmed {
        return ExtensionOutcome::Declined(missing);
    }

    match host.install(&missing) {
        Ok(()) => {
            ui.success(&format!("Installed {}", missing.join(", ")));
            ExtensionOutcome::Installed(missing)
        }
        Err(e) => {
            ui.warning(&format!("Extension install failed: {}", e));
            ExtensionOutcome::Failed(missing)
        }
    }
}
