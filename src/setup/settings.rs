//! Workspace settings merge.
//!
//! Recommended settings are merged shallowly over whatever the settings file
//! already holds: profile keys win, every other existing key survives.
//! Existing content that is missing, unparsable or not a JSON object counts
//! as empty.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::profiles::Profile;

/// Persisted settings I/O.
pub trait SettingsStore {
    /// Current raw content, or `None` when there is none yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the content.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Where the settings live, for messages.
    fn location(&self) -> String;
}

/// Settings stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse stored settings. `None` means the content is not a JSON object.
pub fn parse_settings(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Shallow merge: `patch` keys overwrite, other `existing` keys survive.
pub fn merge_settings(
    existing: &Map<String, Value>,
    patch: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = existing.clone();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Pretty-print settings with four-space indentation and a final newline.
pub fn render_settings(settings: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    settings.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

/// Computes a profile's merged settings.
pub struct SettingsApplier;

impl SettingsApplier {
    /// Merge `profile`'s settings over `existing`.
    pub fn apply(profile: &Profile, existing: Option<&Map<String, Value>>) -> Map<String, Value> {
        let empty = Map::new();
        merge_settings(existing.unwrap_or(&empty), &profile.settings)
    }
}
