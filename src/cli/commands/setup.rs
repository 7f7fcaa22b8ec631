//! Setup command implementation.
//!
//! The `stackup setup` command detects the workspace's profile and walks
//! through extensions, tools, install steps and settings.

use crate::cli::args::SetupArgs;
use crate::detection::FsWorkspace;
use crate::error::Result;
use crate::profiles::ProfileRegistry;
use crate::setup::{
    Collaborators, EditorCli, FileSettingsStore, SetupOrchestrator, SetupOutcome, StepOutcome,
};
use crate::shell::{DetachedTerminal, SystemShell};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_NOTHING_TO_DO};

/// The setup command implementation.
pub struct SetupCommand {
    context: CommandContext,
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(context: CommandContext, args: SetupArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SetupArgs {
        &self.args
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.context.project_root;
        let config = self.context.load_config()?;
        let registry = ProfileRegistry::load(root)?;
        let forced = self.args.profile.as_deref().or(config.profile.as_deref());

        let shell = match config.probe_timeout() {
            Some(secs) => SystemShell::with_timeout(secs),
            None => SystemShell::new(),
        };
        let log_dir = root.join(".stackup").join("logs");
        let mut terminal = DetachedTerminal::new(&log_dir);
        let mut extensions =
            EditorCli::new(&config.editor_command).with_timeout(config.probe_timeout());
        let mut settings = FileSettingsStore::new(config.settings_path(root));
        let workspace = FsWorkspace::new(root.as_path());

        let report = SetupOrchestrator::new(&registry, root)
            .with_exclude(config.exclude())
            .with_profile(forced)
            .run(Collaborators {
                search: &workspace,
                shell: &shell,
                dispatcher: &mut terminal,
                extensions: &mut extensions,
                settings: &mut settings,
                ui: &mut *ui,
            })?;

        for step in &report.install_steps {
            if let StepOutcome::DispatchFailed(reason) = &step.outcome {
                ui.warning(&format!("Could not start `{}`: {}", step.command, reason));
            }
        }

        if terminal.dispatched() > 0 {
            if self.args.wait {
                let mut spinner = ui.start_spinner("Waiting for install commands...");
                let outcomes = terminal.wait_all();
                spinner.finish_success("Install commands finished");
                for outcome in outcomes {
                    let log = outcome.log_path.display();
                    if outcome.succeeded() {
                        ui.success(&format!("{} finished (log: {})", outcome.name, log));
                    } else {
                        let code = outcome
                            .exit_code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "none".to_string());
                        ui.warning(&format!(
                            "{} exited with code {} (log: {})",
                            outcome.name, code, log
                        ));
                    }
                }
            } else {
                ui.message(&format!(
                    "Install commands are running in the background. Output goes to {}",
                    log_dir.display()
                ));
            }
        }

        Ok(match report.outcome {
            SetupOutcome::Complete { .. } => CommandResult::success(),
            SetupOutcome::NoWorkspace | SetupOutcome::NoProfileDetected => {
                CommandResult::failure(EXIT_NOTHING_TO_DO)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackupError;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CUSTOM_PROFILE: &str = r#"
id: custom
name: Custom Stack
detection:
  file_patterns:
    - "**/stack.txt"
settings:
  editor.tabSize: 2
"#;

    fn project(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let profiles = temp.path().join(".stackup").join("profiles");
        fs::create_dir_all(&profiles).unwrap();
        fs::write(profiles.join("custom.yml"), CUSTOM_PROFILE).unwrap();
        for file in files {
            fs::write(temp.path().join(file), "").unwrap();
        }
        temp
    }

    fn run(root: &Path, args: SetupArgs, ui: &mut MockUI) -> Result<CommandResult> {
        SetupCommand::new(CommandContext::new(root), args).execute(ui)
    }

    #[test]
    fn unmatched_workspace_exits_2() {
        let temp = project(&["notes.md"]);
        let mut ui = MockUI::new();
        let result = run(temp.path(), SetupArgs::default(), &mut ui).unwrap();
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn missing_workspace_exits_2() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = run(&temp.path().join("gone"), SetupArgs::default(), &mut ui).unwrap();
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_warning("No workspace found"));
    }

    #[test]
    fn custom_profile_completes_and_writes_settings() {
        let temp = project(&["stack.txt"]);
        let mut ui = MockUI::new();
        ui.set_prompt_response("apply_settings", "yes");

        let result = run(temp.path(), SetupArgs::default(), &mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(ui.has_success("Custom Stack setup complete."));
        let written = fs::read_to_string(temp.path().join(".vscode/settings.json")).unwrap();
        assert!(written.contains("\"editor.tabSize\": 2"));
    }

    #[test]
    fn declined_settings_leave_no_file() {
        let temp = project(&["stack.txt"]);
        let mut ui = MockUI::new();

        let result = run(temp.path(), SetupArgs::default(), &mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(!temp.path().join(".vscode").exists());
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let temp = project(&["stack.txt"]);
        let mut ui = MockUI::new();
        let args = SetupArgs {
            profile: Some("nope".to_string()),
            ..Default::default()
        };

        let err = run(temp.path(), args, &mut ui).unwrap_err();
        assert!(matches!(err, StackupError::UnknownProfile { .. }));
    }

    #[test]
    fn configured_settings_file_is_used() {
        let temp = project(&["stack.txt"]);
        fs::write(
            temp.path().join(".stackup").join("config.yml"),
            "settings_file: editor/settings.json\n",
        )
        .unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("apply_settings", "yes");

        run(temp.path(), SetupArgs::default(), &mut ui).unwrap();

        assert!(temp.path().join("editor/settings.json").is_file());
    }
}
