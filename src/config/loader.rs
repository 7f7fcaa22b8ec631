//! Configuration file discovery and loading.

use crate::config::merger::merge_layers;
use crate::config::schema::StackupConfig;
use crate::error::{Result, StackupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. User global config (`~/.stackup/config.yml`)
/// 2. Project config (`.stackup/config.yml`)
/// 3. Local overrides (`.stackup/config.local.yml`)
/// 4. An explicit `--config` file
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.stackup/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .stackup/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .stackup/config.local.yml
    pub project_local: Option<PathBuf>,

    /// Explicitly requested config file
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: home_dir()
                .map(|home| home.join(".stackup").join("config.yml"))
                .filter(|p| p.is_file()),
            project: existing(project_root.join(".stackup").join("config.yml")),
            project_local: existing(project_root.join(".stackup").join("config.local.yml")),
            explicit: None,
        }
    }

    /// Add an explicit config file on top.
    pub fn with_explicit(mut self, path: Option<&Path>) -> Self {
        self.explicit = path.map(Path::to_path_buf);
        self
    }

    /// Returns all config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        [
            &self.user_global,
            &self.project,
            &self.project_local,
            &self.explicit,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// The user's home directory from `HOME` (or `USERPROFILE` on Windows).
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Load a config file as a raw YAML value for merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StackupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StackupError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| StackupError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every config layer for a project.
///
/// Missing layers are skipped; with no files at all the defaults apply.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<StackupConfig> {
    let paths = ConfigPaths::discover(project_root).with_explicit(explicit);

    let mut layers = Vec::new();
    for path in paths.all() {
        tracing::debug!("loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_layers(&layers);
    let source = paths
        .all()
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| project_root.join(".stackup").join("config.yml"));

    serde_yaml::from_value(merged).map_err(|e| StackupError::ConfigParseError {
        path: source,
        message: format!("Failed to parse merged config: {}", e),
    })
}
