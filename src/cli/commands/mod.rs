//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`]. Exit codes are shared:
//! 0 when the command did its job, 2 when there was nothing to set up (no
//! workspace or no matching profile), 1 for errors and for `check` finding
//! missing tools.

pub mod check;
pub mod completions;
pub mod detect;
pub mod dispatcher;
pub mod profiles;
pub mod setup;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult, EXIT_NOTHING_TO_DO};
