//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default probe wait, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Default exclusion for workspace search.
pub const DEFAULT_EXCLUDE: &str = "**/node_modules/**";

/// Default settings file, relative to the workspace root.
pub const DEFAULT_SETTINGS_FILE: &str = ".vscode/settings.json";

/// Default editor CLI.
pub const DEFAULT_EDITOR_COMMAND: &str = "code";

/// Merged stackup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackupConfig {
    /// Seconds a tool probe may run before it counts as not found
    pub probe_timeout_secs: u64,

    /// Glob excluded from workspace search
    pub exclude: String,

    /// Settings file, relative to the workspace root
    pub settings_file: PathBuf,

    /// Editor CLI used to list and install extensions
    pub editor_command: String,

    /// Profile id to use instead of detecting one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Default for StackupConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            exclude: DEFAULT_EXCLUDE.to_string(),
            settings_file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            editor_command: DEFAULT_EDITOR_COMMAND.to_string(),
            profile: None,
        }
    }
}

impl StackupConfig {
    /// Exclusion glob, or `None` when disabled with an empty string.
    pub fn exclude(&self) -> Option<&str> {
        let exclude = self.exclude.trim();
        (!exclude.is_empty()).then_some(exclude)
    }

    /// Absolute settings file path for a workspace.
    pub fn settings_path(&self, workspace: &Path) -> PathBuf {
        if self.settings_file.is_absolute() {
            self.settings_file.clone()
        } else {
            workspace.join(&self.settings_file)
        }
    }

    /// Probe timeout, with `0` meaning no limit.
    pub fn probe_timeout(&self) -> Option<u64> {
        (self.probe_timeout_secs > 0).then_some(self.probe_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StackupConfig::default();
        assert_eq!(config.probe_timeout(), Some(10));
        assert_eq!(config.exclude(), Some("**/node_modules/**"));
        assert_eq!(config.editor_command, "code");
        assert!(config.profile.is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: StackupConfig = serde_yaml::from_str("profile: nodejs").unwrap();
        assert_eq!(config.profile.as_deref(), Some("nodejs"));
        assert_eq!(config.probe_timeout_secs, 10);
    }

    #[test]
    fn empty_exclude_disables_exclusion() {
        let config: StackupConfig = serde_yaml::from_str("exclude: ''").unwrap();
        assert_eq!(config.exclude(), None);
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let config: StackupConfig = serde_yaml::from_str("probe_timeout_secs: 0").unwrap();
        assert_eq!(config.probe_timeout(), None);
    }

    #[test]
    fn settings_path_is_relative_to_workspace() {
        let config = StackupConfig::default();
        assert_eq!(
            config.settings_path(Path::new("/work")),
            PathBuf::from("/work/.vscode/settings.json")
        );
    }
}
