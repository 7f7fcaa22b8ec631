//! Platform-specific shell detection and helpers.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, StackupError};

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }

    /// Join an ordered command list into one script for this shell.
    ///
    /// All commands run in the same shell process, so state set by earlier
    /// commands (an activated virtualenv, a `cd`) is visible to later ones.
    pub fn join_script(&self, commands: &[String]) -> String {
        match self {
            ShellType::Cmd => commands.join(" & "),
            ShellType::PowerShell => commands.join("; "),
            _ => commands.join("\n"),
        }
    }
}

/// The shell used for probes and dispatched commands.
pub fn get_shell_executable() -> PathBuf {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cmd.exe"))
    } else {
        std::env::var("SHELL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/bin/sh"))
    }
}

/// Detect the type of the current shell.
pub fn detect_shell_type() -> ShellType {
    ShellType::from_executable(&get_shell_executable().to_string_lossy())
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lic` (interactive login shell) on Unix so that version managers
/// initialised in `.bashrc`/`.zshrc` put their tools on PATH; probes would
/// otherwise report `python3` or `node` as missing. In CI, uses `-lc` to
/// avoid job-control errors without a TTY.
pub fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if is_ci() {
        "-lc"
    } else {
        "-lic"
    }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// The program and arguments that open a URL in the default browser.
pub fn open_url_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        (
            "cmd",
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                url.to_string(),
            ],
        )
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Open a URL with the platform opener without waiting for the browser.
pub fn open_url(url: &str) -> Result<()> {
    let (program, args) = open_url_command(url);
    Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| StackupError::Collaborator {
            collaborator: program.to_string(),
            message: e.to_string(),
        })
}
