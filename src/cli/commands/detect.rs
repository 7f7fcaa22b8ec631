//! Detect command implementation.
//!
//! The `stackup detect` command reports which profile the workspace matches
//! without changing anything.

use serde::Serialize;

use crate::cli::args::DetectArgs;
use crate::detection::{FsWorkspace, ProfileMatch, ProfileMatcher};
use crate::error::Result;
use crate::profiles::ProfileRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_NOTHING_TO_DO};

/// JSON shape of `detect --json`.
#[derive(Debug, Serialize)]
struct DetectOutput<'p> {
    detected: bool,
    #[serde(flatten)]
    matched: Option<ProfileMatch<'p>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_name: Option<String>,
}

/// The detect command implementation.
pub struct DetectCommand {
    context: CommandContext,
    args: DetectArgs,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(context: CommandContext, args: DetectArgs) -> Self {
        Self { context, args }
    }
}

impl Command for DetectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.context.project_root;
        let workspace = FsWorkspace::new(root.as_path());
        if !workspace.is_open() {
            ui.error(&format!("No workspace found at {}", root.display()));
            return Ok(CommandResult::failure(EXIT_NOTHING_TO_DO));
        }

        let config = self.context.load_config()?;
        let registry = ProfileRegistry::load(root)?;
        let matched =
            ProfileMatcher::new(&workspace, config.exclude()).find_match(registry.profiles());
        let detected = matched.is_some();

        if self.args.json {
            let output = DetectOutput {
                detected,
                profile_name: matched.as_ref().map(|m| m.profile.name.clone()),
                matched,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            match &matched {
                Some(m) => {
                    ui.success(&format!("Detected {} ({})", m.profile.name, m.profile_id));
                    ui.message(&format!(
                        "  matched {} via {}",
                        m.file.display(),
                        m.pattern
                    ));
                }
                None => ui.warning("No supported project type detected."),
            }
        }

        Ok(if detected {
            CommandResult::success()
        } else {
            CommandResult::failure(EXIT_NOTHING_TO_DO)
        })
    }
}
