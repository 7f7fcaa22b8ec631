//! Check command implementation.
//!
//! The `stackup check` command verifies a profile's required tools and exits
//! non-zero when any of them is missing or too old.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::detection::{FsWorkspace, ProfileMatcher};
use crate::error::Result;
use crate::profiles::{Profile, ProfileRegistry};
use crate::shell::SystemShell;
use crate::tools::{GateReport, RemediationEvent, RemediationSink, ToolChecker, ToolGate};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_NOTHING_TO_DO};

/// JSON shape of `check --json`.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    profile_id: &'a str,
    #[serde(flatten)]
    report: &'a GateReport,
}

/// Prints each result as it comes in.
struct PrintSink<'u> {
    ui: &'u mut dyn UserInterface,
    quiet: bool,
}

impl RemediationSink for PrintSink<'_> {
    fn remediate(&mut self, event: &RemediationEvent) {
        if self.quiet {
            return;
        }
        self.ui.warning(&event.message());
        if let Some(url) = &event.download_url {
            self.ui.message(&format!("  download: {}", url));
        }
    }

    fn tool_ready(&mut self, tool: &str, version: &str) {
        if !self.quiet {
            self.ui
                .success(&format!("{} found (version: {}).", tool, version));
        }
    }
}

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: CommandContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    fn resolve<'r>(
        &self,
        registry: &'r ProfileRegistry,
        forced: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Option<&'r Profile>> {
        if let Some(id) = forced {
            return registry.require(id).map(Some);
        }
        let workspace = FsWorkspace::new(self.context.project_root.as_path());
        if !workspace.is_open() {
            return Ok(None);
        }
        Ok(ProfileMatcher::new(&workspace, exclude)
            .find_match(registry.profiles())
            .map(|m| m.profile))
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.context.project_root;
        let config = self.context.load_config()?;
        let registry = ProfileRegistry::load(root)?;
        let forced = self.args.profile.as_deref().or(config.profile.as_deref());

        let Some(profile) = self.resolve(&registry, forced, config.exclude())? else {
            ui.warning("No supported project type detected.");
            return Ok(CommandResult::failure(EXIT_NOTHING_TO_DO));
        };

        let shell = match config.probe_timeout() {
            Some(secs) => SystemShell::with_timeout(secs),
            None => SystemShell::new(),
        };
        // Probes need an existing directory to run in.
        let cwd = if root.is_dir() {
            root.clone()
        } else {
            std::env::current_dir()?
        };
        let checker = ToolChecker::new(&shell, &cwd);

        if !self.args.json {
            ui.show_header(&format!("{} tools", profile.name));
        }
        let report = ToolGate::new(&checker).verify(
            profile,
            &mut PrintSink {
                ui: &mut *ui,
                quiet: self.args.json,
            },
        );

        if self.args.json {
            let output = CheckOutput {
                profile_id: &profile.id,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if report.all_ready {
            ui.success("All required tools are available.");
        } else {
            let missing: Vec<_> = report.missing().map(|r| r.tool.as_str()).collect();
            ui.error(&format!("Missing or outdated: {}", missing.join(", ")));
        }

        Ok(if report.all_ready {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
