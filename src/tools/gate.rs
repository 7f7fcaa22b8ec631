//! Profile-wide tool verification.

use serde::Serialize;

use crate::profiles::{Profile, ToolCheck};

use super::checker::ToolChecker;
use super::status::ToolStatus;

/// Emitted once for every tool that is missing or outdated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationEvent {
    /// Name shown to the user
    pub tool: String,
    /// Why remediation is needed
    pub status: ToolStatus,
    /// Install guide, with any environment guide appended
    pub guide: String,
    /// Download page, if the profile names one
    pub download_url: Option<String>,
}

impl RemediationEvent {
    fn for_check(check: &ToolCheck, status: &ToolStatus) -> Self {
        Self {
            tool: check.display_name().to_string(),
            status: status.clone(),
            guide: check.guide(),
            download_url: check.download_url().map(str::to_string),
        }
    }

    /// Title for the rendered guide.
    pub fn guide_title(&self) -> String {
        match self.status {
            ToolStatus::FoundBelowMinimum { .. } => format!("{} Upgrade Guide", self.tool),
            _ => format!("{} Installation Guide", self.tool),
        }
    }

    /// Status message for this tool.
    pub fn message(&self) -> String {
        self.status.describe(&self.tool)
    }
}

/// Receives tool results as the gate produces them.
pub trait RemediationSink {
    /// A tool is missing or below its minimum version.
    fn remediate(&mut self, event: &RemediationEvent);

    /// A tool passed its check.
    fn tool_ready(&mut self, _tool: &str, _version: &str) {}
}

impl RemediationSink for Vec<RemediationEvent> {
    fn remediate(&mut self, event: &RemediationEvent) {
        self.push(event.clone());
    }
}

/// Outcome of one tool check.
#[derive(Debug, Clone, Serialize)]
pub struct ToolReport {
    /// Display name of the tool
    pub tool: String,
    /// Probe command that was run
    pub command: String,
    /// Minimum version, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    /// Result of the probe
    #[serde(flatten)]
    pub status: ToolStatus,
}

/// Aggregate result of verifying every tool a profile needs.
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    /// True only when every tool is `Found`
    pub all_ready: bool,
    /// Per-tool results in declaration order
    pub per_tool: Vec<ToolReport>,
}

impl GateReport {
    /// Tools that are not ready.
    pub fn missing(&self) -> impl Iterator<Item = &ToolReport> {
        self.per_tool.iter().filter(|r| !r.status.is_found())
    }
}

/// Runs every tool check of a profile, in order, without short-circuiting.
pub struct ToolGate<'a> {
    checker: &'a ToolChecker<'a>,
}

impl<'a> ToolGate<'a> {
    pub fn new(checker: &'a ToolChecker<'a>) -> Self {
        Self { checker }
    }

    /// Verify all of `profile`'s tools, reporting each result to `sink`.
    pub fn verify(&self, profile: &Profile, sink: &mut dyn RemediationSink) -> GateReport {
        let mut per_tool = Vec::with_capacity(profile.tool_checks().len());
        let mut all_ready = true;

        for check in profile.tool_checks() {
            let status = self.checker.check_tool(check);
            match &status {
                ToolStatus::Found { version } => sink.tool_ready(check.display_name(), version),
                _ => {
                    all_ready = false;
                    sink.remediate(&RemediationEvent::for_check(check, &status));
                }
            }
            per_tool.push(ToolReport {
                tool: check.display_name().to_string(),
                command: check.command.clone(),
                min_version: check.min_version.clone(),
                status,
            });
        }

        tracing::debug!(
            "profile '{}' tools ready: {} ({} checked)",
            profile.id,
            all_ready,
            per_tool.len()
        );

        GateReport {
            all_ready,
            per_tool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StackupError};
    use crate::shell::ShellRunner;
    use std::path::Path;

    struct FixedShell;

    impl ShellRunner for FixedShell {
        fn run_in_shell(&self, command: &str, _cwd: &Path) -> Result<String> {
            match command {
                "gcc --version" => Ok("gcc (GCC) 9.4.0".to_string()),
                "cmake --version" => Ok("cmake version 3.10.2".to_string()),
                _ => Err(StackupError::CommandFailed {
                    command: command.to_string(),
                    code: Some(127),
                }),
            }
        }
    }

    fn tool(name: &str, command: &str, min: Option<&str>) -> ToolCheck {
        ToolCheck {
            name: name.to_string(),
            command: command.to_string(),
            min_version: min.map(str::to_string),
            install_guide: format!("Install {}.", name),
            download_url: Some(format!("https://example.com/{}", name.to_lowercase())),
            ..Default::default()
        }
    }

    #[test]
    fn one_found_one_missing_yields_one_event() {
        let shell = FixedShell;
        let checker = ToolChecker::new(&shell, Path::new("."));
        let gate = ToolGate::new(&checker);
        let profile = Profile::new("cpp", "C++")
            .with_tool(tool("GCC", "gcc --version", None))
            .with_tool(tool("Ninja", "ninja --version", None));

        let mut events: Vec<RemediationEvent> = Vec::new();
        let report = gate.verify(&profile, &mut events);

        assert!(!report.all_ready);
        assert_eq!(report.per_tool.len(), 2);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool, "Ninja");
        assert_eq!(events[0].status, ToolStatus::NotFound);
        assert_eq!(events[0].guide_title(), "Ninja Installation Guide");
    }

    #[test]
    fn outdated_tool_gets_upgrade_guide() {
        let shell = FixedShell;
        let checker = ToolChecker::new(&shell, Path::new("."));
        let gate = ToolGate::new(&checker);
        let profile =
            Profile::new("cpp", "C++").with_tool(tool("CMake", "cmake --version", Some("3.15.0")));

        let mut events: Vec<RemediationEvent> = Vec::new();
        let report = gate.verify(&profile, &mut events);

        assert!(!report.all_ready);
        assert_eq!(events[0].guide_title(), "CMake Upgrade Guide");
        assert_eq!(
            events[0].download_url.as_deref(),
            Some("https://example.com/cmake")
        );
        assert!(events[0].message().contains("minimum required is 3.15.0"));
    }

    #[test]
    fn no_tool_checks_is_ready() {
        let shell = FixedShell;
        let checker = ToolChecker::new(&shell, Path::new("."));
        let gate = ToolGate::new(&checker);

        let mut events: Vec<RemediationEvent> = Vec::new();
        let report = gate.verify(&Profile::new("empty", "Empty"), &mut events);

        assert!(report.all_ready);
        assert!(report.per_tool.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn checks_run_in_declaration_order() {
        let shell = FixedShell;
        let checker = ToolChecker::new(&shell, Path::new("."));
        let gate = ToolGate::new(&checker);
        let profile = Profile::new("cpp", "C++")
            .with_tool(tool("Ninja", "ninja --version", None))
            .with_tool(tool("GCC", "gcc --version", None));

        let mut events: Vec<RemediationEvent> = Vec::new();
        let report = gate.verify(&profile, &mut events);
        let names: Vec<_> = report.per_tool.iter().map(|r| r.tool.as_str()).collect();

        assert_eq!(names, vec!["Ninja", "GCC"]);
        assert_eq!(report.missing().count(), 1);
    }
}
