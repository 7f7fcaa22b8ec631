//! Captured shell execution for tool probes.

use std::path::Path;

use crate::error::Result;

use super::command::{execute, CommandOptions};

/// Runs a command in the workspace's shell context and captures its output.
///
/// Implementations return the combined stdout/stderr text whatever the exit
/// code; only a failure to run the command at all is an error.
pub trait ShellRunner {
    /// Run `command` with `cwd` as working directory.
    fn run_in_shell(&self, command: &str, cwd: &Path) -> Result<String>;
}

/// [`ShellRunner`] backed by the user's login shell.
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    timeout_secs: Option<u64>,
}

impl SystemShell {
    /// Create a runner that waits indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that kills commands after `secs` seconds.
    pub fn with_timeout(secs: u64) -> Self {
        Self {
            timeout_secs: Some(secs),
        }
    }
}

impl ShellRunner for SystemShell {
    fn run_in_shell(&self, command: &str, cwd: &Path) -> Result<String> {
        let options = CommandOptions {
            cwd: Some(cwd.to_path_buf()),
            timeout: self.timeout_secs,
            ..Default::default()
        };
        let result = execute(command, &options)?;
        tracing::debug!(
            "probe `{}` exited with {:?} in {:?}",
            command,
            result.exit_code,
            result.duration
        );
        Ok(result.combined_output())
    }
}
