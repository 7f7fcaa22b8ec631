//! Profile schema definitions.
//!
//! A profile is a declarative description of one language/tooling stack:
//! how to recognise it, which tools it needs, which editor extensions and
//! settings it recommends, and which install steps it offers. The engine
//! never branches on a profile id; everything it does comes from this data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A language/tooling stack profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    /// Unique identifier (e.g., "python", "nodejs")
    pub id: String,

    /// Display name used in prompts and messages
    pub name: String,

    /// How to recognise the stack and which tools it needs
    pub detection: Detection,

    /// Recommended editor extension identifiers
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Conditional, confirmed install steps in declaration order
    #[serde(default)]
    pub install_steps: Vec<InstallStep>,

    /// Recommended editor settings, merged over existing settings
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Detection rules and tool requirements for a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// Workspace file globs; any hit selects the profile
    pub file_patterns: Vec<String>,

    /// Tools that must be installed, checked in order
    #[serde(default)]
    pub tool_checks: Vec<ToolCheck>,
}

/// A command-line tool the profile needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolCheck {
    /// Human-readable tool name
    #[serde(default)]
    pub name: String,

    /// Probe command whose output contains the tool version
    pub command: String,

    /// Minimum acceptable version
    #[serde(default)]
    pub min_version: Option<String>,

    /// Installation guide shown when the tool is missing or outdated
    #[serde(default)]
    pub install_guide: String,

    /// Additional PATH/environment guide appended to the install guide
    #[serde(default)]
    pub env_guide: Option<String>,

    /// Download page for the tool
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ToolCheck {
    /// Name shown to the user.
    ///
    /// Falls back to the first word of the probe command when no name is set.
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.command.split_whitespace().next().unwrap_or("tool")
    }

    /// Download URL, if one is set and non-empty.
    pub fn download_url(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Full guide text: install guide, then the environment guide if any.
    pub fn guide(&self) -> String {
        let install = self.install_guide.trim();
        match self.env_guide.as_deref().map(str::trim) {
            Some(env) if !env.is_empty() => format!("{}\n\n{}", install, env),
            _ => install.to_string(),
        }
    }
}

/// When an install step applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InstallCondition {
    /// The detection file exists under the workspace root.
    #[default]
    FileExists,
}

/// A conditional, user-confirmed shell action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstallStep {
    /// Question asked before running the step
    pub prompt: String,

    /// Main command
    pub command: String,

    /// Workspace-relative file the condition looks at
    pub detection_file: String,

    /// Condition kind
    #[serde(default)]
    pub condition: InstallCondition,

    /// Commands run in the same context before the main command
    #[serde(default)]
    pub pre_commands: Vec<String>,
}

impl InstallStep {
    /// Pre-commands followed by the main command.
    pub fn commands(&self) -> Vec<String> {
        let mut commands = self.pre_commands.clone();
        commands.push(self.command.clone());
        commands
    }
}

impl Profile {
    /// Create an empty profile.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            detection: Detection::default(),
            extensions: Vec::new(),
            install_steps: Vec::new(),
            settings: Map::new(),
        }
    }

    /// Add a detection pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.detection.file_patterns.push(pattern.to_string());
        self
    }

    /// Add a tool check.
    pub fn with_tool(mut self, check: ToolCheck) -> Self {
        self.detection.tool_checks.push(check);
        self
    }

    /// Add a recommended extension.
    pub fn with_extension(mut self, id: &str) -> Self {
        self.extensions.push(id.to_string());
        self
    }

    /// Add an install step.
    pub fn with_install_step(mut self, step: InstallStep) -> Self {
        self.install_steps.push(step);
        self
    }

    /// Add a recommended setting.
    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        self.settings.insert(key.to_string(), value);
        self
    }

    /// Detection patterns in declaration order.
    pub fn file_patterns(&self) -> &[String] {
        &self.detection.file_patterns
    }

    /// Tool checks in declaration order.
    pub fn tool_checks(&self) -> &[ToolCheck] {
        &self.detection.tool_checks
    }
}
