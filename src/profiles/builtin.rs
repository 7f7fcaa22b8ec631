//! Built-in profiles embedded at compile time.

use crate::error::{Result, StackupError};
use include_dir::{include_dir, Dir, File};
use std::collections::HashMap;

use super::manifest::ProfileManifest;
use super::schema::Profile;

/// Embedded profiles directory.
static PROFILES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/profiles");

const MANIFEST_FILE: &str = "registry.yml";

fn file_contents<'a>(file: &'a File<'a>) -> Result<&'a str> {
    file.contents_utf8()
        .ok_or_else(|| StackupError::ProfileParseError {
            path: file.path().to_path_buf(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Load the built-in profile manifest.
pub fn load_manifest() -> Result<ProfileManifest> {
    let file = PROFILES_DIR
        .get_file(MANIFEST_FILE)
        .ok_or_else(|| StackupError::ProfileParseError {
            path: MANIFEST_FILE.into(),
            message: "manifest is missing".to_string(),
        })?;

    serde_yaml::from_str(file_contents(file)?).map_err(|e| StackupError::ProfileParseError {
        path: MANIFEST_FILE.into(),
        message: e.to_string(),
    })
}

/// Load every embedded profile, keyed by id.
pub fn load_profiles() -> Result<HashMap<String, Profile>> {
    let mut profiles = HashMap::new();

    for file in PROFILES_DIR.files() {
        let path = file.path();
        if path.file_name().map(|n| n == MANIFEST_FILE).unwrap_or(false) {
            continue;
        }
        let is_yaml = path
            .extension()
            .map(|e| e == "yml" || e == "yaml")
            .unwrap_or(false);
        if !is_yaml {
            continue;
        }

        let profile: Profile = serde_yaml::from_str(file_contents(file)?).map_err(|e| {
            StackupError::ProfileParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        profiles.insert(profile.id.clone(), profile);
    }

    Ok(profiles)
}

/// Built-in profiles in manifest detection order.
///
/// Profiles missing from the manifest are appended in id order so that a
/// forgotten manifest entry still leaves the profile reachable.
pub fn builtin_profiles() -> Result<Vec<Profile>> {
    let manifest = load_manifest()?;
    let mut by_id = load_profiles()?;

    let mut ordered = Vec::with_capacity(by_id.len());
    for id in &manifest.detection_order {
        match by_id.remove(id) {
            Some(profile) => ordered.push(profile),
            None => tracing::warn!("Manifest lists unknown built-in profile '{}'", id),
        }
    }

    let mut rest: Vec<Profile> = by_id.into_values().collect();
    rest.sort_by(|a, b| a.id.cmp(&b.id));
    ordered.extend(rest);

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_orders_python_first() {
        let manifest = load_manifest().unwrap();
        assert_eq!(manifest.detection_order, vec!["python", "nodejs", "cpp"]);
    }

    #[test]
    fn all_builtin_profiles_parse() {
        let profiles = load_profiles().unwrap();
        assert!(profiles.contains_key("python"));
        assert!(profiles.contains_key("nodejs"));
        assert!(profiles.contains_key("cpp"));
    }

    #[test]
    fn builtin_profiles_follow_manifest() {
        let ids: Vec<_> = builtin_profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["python", "nodejs", "cpp"]);
    }

    #[test]
    fn python_profile_contents() {
        let profiles = load_profiles().unwrap();
        let python = &profiles["python"];

        assert_eq!(python.name, "Python");
        assert_eq!(python.file_patterns()[0], "**/requirements.txt");
        assert_eq!(python.tool_checks().len(), 2);
        assert_eq!(python.tool_checks()[0].command, "python3 --version");
        assert_eq!(python.tool_checks()[0].min_version.as_deref(), Some("3.9.0"));
        assert_eq!(python.install_steps[0].detection_file, "requirements.txt");
        assert_eq!(python.install_steps[0].pre_commands.len(), 2);
        assert!(python.settings.contains_key("editor.formatOnSave"));
    }

    #[test]
    fn cpp_make_check_has_no_minimum_or_url() {
        let profiles = load_profiles().unwrap();
        let make = profiles["cpp"]
            .tool_checks()
            .iter()
            .find(|c| c.name == "Make")
            .unwrap();
        assert!(make.min_version.is_none());
        assert!(make.download_url().is_none());
    }

    #[test]
    fn every_builtin_has_guides_for_its_tools() {
        for profile in builtin_profiles().unwrap() {
            for check in profile.tool_checks() {
                assert!(
                    !check.install_guide.trim().is_empty(),
                    "{} / {} has no guide",
                    profile.id,
                    check.display_name()
                );
            }
        }
    }
}
