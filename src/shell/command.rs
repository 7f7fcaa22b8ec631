//! Shell command execution.

use crate::error::{Result, StackupError};
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::platform::{get_shell_executable, shell_flag};

/// Interval between exit polls while a deadline is active.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            stdout,
            stderr,
            duration,
            success: status.success(),
        }
    }

    /// Stdout followed by stderr.
    ///
    /// Many tools print their version banner on stderr (`java -version`,
    /// older `python --version`), so probes look at both streams.
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Timeout in seconds (None = wait indefinitely).
    pub timeout: Option<u64>,
}

/// Execute a shell command, capturing stdout and stderr.
///
/// When `options.timeout` is set and the command is still running at the
/// deadline, the shell is killed and [`StackupError::CommandTimedOut`] is
/// returned.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = get_shell_executable();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|_| StackupError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let status = match options.timeout {
        Some(secs) => match wait_with_deadline(&mut child, Duration::from_secs(secs))? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                // Reader threads are left to finish on their own: a grandchild
                // may still hold the pipes open.
                return Err(StackupError::CommandTimedOut {
                    command: command.to_string(),
                    timeout_secs: secs,
                });
            }
        },
        None => child.wait()?,
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    Ok(CommandResult::from_status(
        status,
        stdout,
        stderr,
        start.elapsed(),
    ))
}

/// Read a child pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}

/// Poll a child until it exits or the deadline passes.
///
/// Returns `Ok(None)` when the deadline passed first.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 1", &CommandOptions::default()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions::default();
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let cmd = if cfg!(target_os = "windows") {
            "echo %MY_VAR%"
        } else {
            "echo $MY_VAR"
        };

        let result = execute(cmd, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let cmd = if cfg!(target_os = "windows") {
            "dir /b"
        } else {
            "ls"
        };

        let result = execute(cmd, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn combined_output_includes_stderr() {
        let result = execute("echo out; echo err 1>&2", &CommandOptions::default()).unwrap();
        let combined = result.combined_output();
        assert!(combined.contains("out"));
        assert!(combined.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_times_out() {
        let options = CommandOptions {
            timeout: Some(1),
            ..Default::default()
        };

        let start = Instant::now();
        let err = execute("sleep 5", &options).unwrap_err();

        assert!(matches!(err, StackupError::CommandTimedOut { timeout_secs: 1, .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn combined_output_separates_streams() {
        let result = CommandResult {
            exit_code: Some(0),
            stdout: "a".to_string(),
            stderr: "b".to_string(),
            duration: Duration::ZERO,
            success: true,
        };
        assert_eq!(result.combined_output(), "a\nb");
    }
}
