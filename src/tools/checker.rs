//! Tool probing.
//!
//! A probe is a shell command such as `python3 --version`. The checker runs
//! it, pulls the first `x.y.z` version out of the output and compares it to
//! the profile's minimum. A probe that prints no version is treated exactly
//! like a missing tool, whatever its exit code.

use std::path::{Path, PathBuf};

use crate::profiles::ToolCheck;
use crate::shell::ShellRunner;

use super::status::ToolStatus;
use super::version::{extract_version, meets_minimum};

/// Classify probe output against an optional minimum version.
pub fn classify(output: &str, min_version: Option<&str>) -> ToolStatus {
    let Some(version) = extract_version(output) else {
        return ToolStatus::NotFound;
    };

    match min_version {
        Some(required) if !meets_minimum(&version, required) => ToolStatus::FoundBelowMinimum {
            version,
            required: required.to_string(),
        },
        _ => ToolStatus::Found { version },
    }
}

/// Runs probe commands in the workspace and classifies the result.
pub struct ToolChecker<'a> {
    shell: &'a dyn ShellRunner,
    cwd: PathBuf,
}

impl<'a> ToolChecker<'a> {
    /// Create a checker running probes from `cwd`.
    pub fn new(shell: &'a dyn ShellRunner, cwd: &Path) -> Self {
        Self {
            shell,
            cwd: cwd.to_path_buf(),
        }
    }

    /// Probe a command and classify its output.
    ///
    /// Never fails: execution errors and timeouts become [`ToolStatus::NotFound`].
    pub fn check(&self, probe: &str, min_version: Option<&str>) -> ToolStatus {
        match self.shell.run_in_shell(probe, &self.cwd) {
            Ok(output) => {
                let status = classify(&output, min_version);
                tracing::debug!("probe `{}` -> {:?}", probe, status);
                status
            }
            Err(e) => {
                tracing::debug!("probe `{}` failed: {}", probe, e);
                ToolStatus::NotFound
            }
        }
    }

    /// Probe a profile's tool check.
    pub fn check_tool(&self, check: &ToolCheck) -> ToolStatus {
        self.check(&check.command, check.min_version.as_deref())
    }
}
