//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, SetupArgs};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code for a workspace with nothing to set up.
pub const EXIT_NOTHING_TO_DO: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command runs and which extra config it reads.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Workspace root.
    pub project_root: PathBuf,
    /// `--config` file, if given.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
        }
    }

    /// Load the layered configuration for this workspace.
    pub fn load_config(&self) -> Result<crate::config::StackupConfig> {
        crate::config::load_config(&self.project_root, self.config_path.as_deref())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: CommandContext::new(&project_root),
        }
    }

    /// Merge this config file over the discovered ones.
    pub fn with_config(mut self, config_path: Option<PathBuf>) -> Self {
        self.context.config_path = config_path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Setup(args)) => {
                let cmd = super::setup::SetupCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Detect(args)) => {
                let cmd = super::detect::DetectCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Profiles(args)) => {
                let cmd = super::profiles::ProfilesCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to setup with default args
                let cmd = super::setup::SetupCommand::new(self.context.clone(), SetupArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
