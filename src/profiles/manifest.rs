//! Profile manifest definitions.
//!
//! The manifest fixes the order in which built-in profiles are tried during
//! detection. Order matters: the first matching profile wins.

use serde::{Deserialize, Serialize};

/// Manifest listing built-in profiles in detection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileManifest {
    /// Manifest version.
    #[serde(default = "default_manifest_version")]
    pub version: u32,

    /// Profile ids in detection order.
    #[serde(default)]
    pub detection_order: Vec<String>,
}

fn default_manifest_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let yaml = r#"
version: 1
detection_order:
  - python
  - nodejs
"#;
        let manifest: ProfileManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.version, 1);
        assert_eq!(manifest.detection_order, vec!["python", "nodejs"]);
    }

    #[test]
    fn manifest_defaults() {
        let manifest: ProfileManifest = serde_yaml::from_str("{}").unwrap();
        assert_eq!(manifest.version, 1);
        assert!(manifest.detection_order.is_empty());
    }
}
