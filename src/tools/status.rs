//! Tool status types.
//!
//! Each tool check produces a `ToolStatus` describing whether the tool is
//! available and new enough. Statuses live for one run only.

use serde::Serialize;

/// The result of probing a single tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolStatus {
    /// Tool is present and meets the minimum version, if any.
    Found {
        /// Version reported by the probe
        version: String,
    },

    /// Tool is present but older than required.
    FoundBelowMinimum {
        /// Version reported by the probe
        version: String,
        /// Minimum the profile asks for
        required: String,
    },

    /// No parseable version came back (missing tool, failed or timed-out probe).
    NotFound,
}

impl ToolStatus {
    /// Whether the tool is ready to use.
    pub fn is_found(&self) -> bool {
        matches!(self, ToolStatus::Found { .. })
    }

    /// Version reported by the probe, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            ToolStatus::Found { version } | ToolStatus::FoundBelowMinimum { version, .. } => {
                Some(version)
            }
            ToolStatus::NotFound => None,
        }
    }

    /// One-line status message for a tool.
    pub fn describe(&self, tool: &str) -> String {
        match self {
            ToolStatus::Found { version } => format!("{} found (version: {}).", tool, version),
            ToolStatus::FoundBelowMinimum { version, required } => format!(
                "{} version {} found, but minimum required is {}. Please upgrade.",
                tool, version, required
            ),
            ToolStatus::NotFound => format!("{} not found. Please install it.", tool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_is_found() {
        let status = ToolStatus::Found {
            version: "3.11.4".to_string(),
        };
        assert!(status.is_found());
        assert_eq!(status.version(), Some("3.11.4"));
    }

    #[test]
    fn below_minimum_is_not_found_but_has_version() {
        let status = ToolStatus::FoundBelowMinimum {
            version: "16.20.0".to_string(),
            required: "18.0.0".to_string(),
        };
        assert!(!status.is_found());
        assert_eq!(status.version(), Some("16.20.0"));
    }

    #[test]
    fn not_found_has_no_version() {
        assert!(!ToolStatus::NotFound.is_found());
        assert_eq!(ToolStatus::NotFound.version(), None);
    }

    #[test]
    fn describe_messages() {
        assert_eq!(
            ToolStatus::NotFound.describe("CMake"),
            "CMake not found. Please install it."
        );
        assert_eq!(
            ToolStatus::FoundBelowMinimum {
                version: "3.10.2".to_string(),
                required: "3.15.0".to_string(),
            }
            .describe("CMake"),
            "CMake version 3.10.2 found, but minimum required is 3.15.0. Please upgrade."
        );
        assert_eq!(
            ToolStatus::Found {
                version: "3.27.4".to_string()
            }
            .describe("CMake"),
            "CMake found (version: 3.27.4)."
        );
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(ToolStatus::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");
    }
}
