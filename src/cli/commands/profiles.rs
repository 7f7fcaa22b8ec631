//! Profiles command implementation.
//!
//! The `stackup profiles` command lists known profiles in detection order.

use serde::Serialize;

use crate::cli::args::ProfilesArgs;
use crate::error::Result;
use crate::profiles::{local_profiles_dir, Profile, ProfileRegistry};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// One row of `profiles --json`.
#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    id: &'a str,
    name: &'a str,
    file_patterns: &'a [String],
    tools: Vec<&'a str>,
    extensions: &'a [String],
    install_steps: usize,
    settings: usize,
}

impl<'a> From<&'a Profile> for ProfileSummary<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            id: &profile.id,
            name: &profile.name,
            file_patterns: profile.file_patterns(),
            tools: profile
                .tool_checks()
                .iter()
                .map(|t| t.display_name())
                .collect(),
            extensions: &profile.extensions,
            install_steps: profile.install_steps.len(),
            settings: profile.settings.len(),
        }
    }
}

/// The profiles command implementation.
pub struct ProfilesCommand {
    context: CommandContext,
    args: ProfilesArgs,
}

impl ProfilesCommand {
    /// Create a new profiles command.
    pub fn new(context: CommandContext, args: ProfilesArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ProfilesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(Profile);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(CommandResult::success());
        }

        let registry = ProfileRegistry::load(&self.context.project_root)?;

        if self.args.json {
            let rows: Vec<ProfileSummary<'_>> =
                registry.profiles().iter().map(ProfileSummary::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(CommandResult::success());
        }

        ui.show_header("Profiles (detection order)");
        for (index, profile) in registry.profiles().iter().enumerate() {
            ui.message(&format!(
                "{}. {} ({}): {}",
                index + 1,
                profile.name,
                profile.id,
                profile.file_patterns().join(", ")
            ));
        }
        if ui.output_mode().shows_details() {
            ui.message("");
            ui.message(&format!(
                "Project profiles in {} are tried first.",
                local_profiles_dir(&self.context.project_root).display()
            ));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_builtins_in_order() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ProfilesCommand::new(CommandContext::new(temp.path()), ProfilesArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.messages()[0].starts_with("1. Python (python)"));
        assert!(ui.has_message("2. Node.js (nodejs)"));
    }

    #[test]
    fn local_profiles_come_first() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".stackup").join("profiles");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("go.yml"),
            "id: go\nname: Go\ndetection:\n  file_patterns: [\"**/go.mod\"]\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        ProfilesCommand::new(CommandContext::new(temp.path()), ProfilesArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.messages()[0].starts_with("1. Go (go)"));
    }

    #[test]
    fn summary_counts() {
        let profile = Profile::new("x", "X")
            .with_pattern("**/x")
            .with_extension("a.b")
            .with_setting("k", serde_json::json!(1));
        let summary = ProfileSummary::from(&profile);
        assert_eq!(summary.settings, 1);
        assert_eq!(summary.install_steps, 0);
        assert!(summary.tools.is_empty());
    }
}
