//! Fire-and-forget command dispatch.
//!
//! Install steps hand their commands to a [`TerminalDispatcher`] and move on.
//! The dispatcher starts the commands in their own execution context and
//! gives nothing back about how they went; that boundary is intentional.
//! [`DetachedTerminal::wait_all`] exists for callers that explicitly opt in
//! to waiting before the process exits.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::{Result, StackupError};

use super::platform::{detect_shell_type, get_shell_executable, shell_flag};

/// Starts an ordered list of commands in a named execution context.
pub trait TerminalDispatcher {
    /// Dispatch `commands` to run in order, in one shell, under `cwd`.
    ///
    /// Returns once the commands have been handed off. An error means the
    /// context could not be started at all.
    fn execute_in_terminal(&mut self, name: &str, cwd: &Path, commands: &[String]) -> Result<()>;
}

/// A context started by [`DetachedTerminal`].
#[derive(Debug)]
struct DispatchedContext {
    name: String,
    log_path: PathBuf,
    child: Child,
}

/// Exit information gathered by [`DetachedTerminal::wait_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Execution context name.
    pub name: String,
    /// File holding the context's stdout and stderr.
    pub log_path: PathBuf,
    /// Exit code (None if killed by signal or the wait failed).
    pub exit_code: Option<i32>,
}

impl DispatchOutcome {
    /// Whether the context exited with code 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// [`TerminalDispatcher`] that runs each context as a detached child process.
///
/// Output goes to `<log_dir>/<context-slug>-<n>.log` so it does not interleave
/// with prompts on the terminal.
#[derive(Debug)]
pub struct DetachedTerminal {
    log_dir: PathBuf,
    contexts: Vec<DispatchedContext>,
}

impl DetachedTerminal {
    /// Create a dispatcher writing logs into `log_dir`.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            contexts: Vec::new(),
        }
    }

    /// Log files of every context started so far.
    pub fn log_paths(&self) -> Vec<&Path> {
        self.contexts.iter().map(|c| c.log_path.as_path()).collect()
    }

    /// Number of contexts started so far.
    pub fn dispatched(&self) -> usize {
        self.contexts.len()
    }

    /// Wait for every dispatched context and report exit codes.
    pub fn wait_all(&mut self) -> Vec<DispatchOutcome> {
        self.contexts
            .drain(..)
            .map(|mut ctx| {
                let exit_code = match ctx.child.wait() {
                    Ok(status) => status.code(),
                    Err(e) => {
                        tracing::warn!("Failed to wait for '{}': {}", ctx.name, e);
                        None
                    }
                };
                DispatchOutcome {
                    name: ctx.name,
                    log_path: ctx.log_path,
                    exit_code,
                }
            })
            .collect()
    }

    fn open_log(&self, name: &str) -> Result<(PathBuf, File)> {
        fs::create_dir_all(&self.log_dir)?;
        let log_path = self
            .log_dir
            .join(format!("{}-{}.log", slug(name), self.contexts.len() + 1));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)?;
        Ok((log_path, file))
    }
}

impl TerminalDispatcher for DetachedTerminal {
    fn execute_in_terminal(&mut self, name: &str, cwd: &Path, commands: &[String]) -> Result<()> {
        let script = detect_shell_type().join_script(commands);
        let (log_path, stdout) = self.open_log(name)?;
        let stderr = stdout.try_clone()?;

        tracing::debug!("dispatching '{}' in {}: {:?}", name, cwd.display(), commands);

        let child = Command::new(get_shell_executable())
            .arg(shell_flag())
            .arg(&script)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|_| StackupError::CommandFailed {
                command: script.clone(),
                code: None,
            })?;

        self.contexts.push(DispatchedContext {
            name: name.to_string(),
            log_path,
            child,
        });
        Ok(())
    }
}

/// Lowercase, dash-separated file name fragment for a context name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "setup".to_string()
    } else {
        trimmed.to_string()
    }
}
