//! Project-local profile loading.
//!
//! Projects can ship their own profiles in `.stackup/profiles/*.yml`. They
//! are tried before the built-ins, in file name order.

use crate::error::{Result, StackupError};
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::Profile;

/// Directory holding project-local profiles.
pub fn local_profiles_dir(project_root: &Path) -> PathBuf {
    project_root.join(".stackup").join("profiles")
}

/// Load project-local profiles sorted by file name.
///
/// A missing directory yields no profiles. A file that fails to parse is an
/// error: silently skipping it would change which profile gets detected.
pub fn load_local_profiles(project_root: &Path) -> Result<Vec<Profile>> {
    let dir = local_profiles_dir(project_root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .map(|e| e == "yml" || e == "yaml")
            .unwrap_or(false);
        if path.is_file() && is_yaml {
            paths.push(path);
        }
    }
    paths.sort();

    let mut profiles = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let profile: Profile =
            serde_yaml::from_str(&content).map_err(|e| StackupError::ProfileParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!("loaded local profile '{}' from {}", profile.id, path.display());
        profiles.push(profile);
    }

    Ok(profiles)
}
