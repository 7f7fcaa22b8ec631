//! Shell command execution.
//!
//! - [`runner`] - captured, bounded execution used by tool probes
//! - [`terminal`] - fire-and-forget dispatch used by install steps
//! - [`platform`] - shell detection, CI detection and URL opening

pub mod command;
pub mod platform;
pub mod runner;
pub mod terminal;

pub use command::{execute, CommandOptions, CommandResult};
pub use platform::{detect_shell_type, is_ci, open_url, ShellType};
pub use runner::{ShellRunner, SystemShell};
pub use terminal::{DetachedTerminal, DispatchOutcome, TerminalDispatcher};
