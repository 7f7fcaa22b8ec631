//! Command-line interface for Stackup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, DetectArgs, ProfilesArgs, SetupArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
