//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Stackup - Detect a project's stack and set up the workspace for it.
#[derive(Debug, Parser)]
#[command(name = "stackup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to an extra config file, merged over .stackup/config.yml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to workspace root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up the workspace (default if no command specified)
    Setup(SetupArgs),

    /// Show which profile matches the workspace
    Detect(DetectArgs),

    /// Check that a profile's required tools are installed
    Check(CheckArgs),

    /// List known profiles
    Profiles(ProfilesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Answer prompts from defaults and STACKUP_PROMPT_* variables
    #[arg(long)]
    pub non_interactive: bool,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Wait for dispatched install commands and report their exit status
    #[arg(long)]
    pub wait: bool,

    /// Use this profile instead of detecting one
    #[arg(long, value_name = "ID")]
    pub profile: Option<String>,
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Check this profile instead of the detected one
    #[arg(long, value_name = "ID")]
    pub profile: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `profiles` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProfilesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the JSON schema of the profile file format
    #[arg(long, conflicts_with = "json")]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
