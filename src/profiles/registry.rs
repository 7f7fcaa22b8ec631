//! Ordered profile registry.

use crate::error::{Result, StackupError};
use std::path::Path;

use super::builtin::builtin_profiles;
use super::local::load_local_profiles;
use super::schema::Profile;

/// All known profiles in detection order.
///
/// Built once at start-up and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    /// Registry with the built-in profiles only.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            profiles: builtin_profiles()?,
        })
    }

    /// Project-local profiles first, then built-ins.
    ///
    /// A local profile with the same id as a built-in replaces it, taking the
    /// local profile's position in the order.
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut registry = Self::builtin()?;
        let local = load_local_profiles(project_root)?;
        registry.prepend(local);
        Ok(registry)
    }

    /// Registry over an explicit list, kept in the given order.
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Place `profiles` ahead of the existing ones, replacing same-id entries.
    pub fn prepend(&mut self, profiles: Vec<Profile>) {
        if profiles.is_empty() {
            return;
        }
        self.profiles
            .retain(|existing| !profiles.iter().any(|p| p.id == existing.id));
        let mut merged = profiles;
        merged.append(&mut self.profiles);
        self.profiles = merged;
    }

    /// Profiles in detection order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Look up a profile by id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Look up a profile by id, failing with [`StackupError::UnknownProfile`].
    pub fn require(&self, id: &str) -> Result<&Profile> {
        self.get(id).ok_or_else(|| StackupError::UnknownProfile { id: id.to_string() })
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ids(registry: &ProfileRegistry) -> Vec<&str> {
        registry.profiles().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn builtin_registry_has_three_profiles() {
        let registry = ProfileRegistry::builtin().unwrap();
        assert_eq!(ids(&registry), vec!["python", "nodejs", "cpp"]);
    }

    #[test]
    fn prepend_puts_local_first() {
        let mut registry = ProfileRegistry::from_profiles(vec![
            Profile::new("python", "Python"),
            Profile::new("nodejs", "Node.js"),
        ]);
        registry.prepend(vec![Profile::new("rust", "Rust")]);
        assert_eq!(ids(&registry), vec!["rust", "python", "nodejs"]);
    }

    #[test]
    fn prepend_replaces_same_id() {
        let mut registry = ProfileRegistry::from_profiles(vec![
            Profile::new("python", "Python"),
            Profile::new("nodejs", "Node.js"),
        ]);
        registry.prepend(vec![Profile::new("nodejs", "Node (custom)")]);

        assert_eq!(ids(&registry), vec!["nodejs", "python"]);
        assert_eq!(registry.get("nodejs").unwrap().name, "Node (custom)");
    }

    #[test]
    fn load_reads_project_profiles() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".stackup").join("profiles");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("go.yml"),
            "id: go\nname: Go\ndetection:\n  file_patterns: ['**/go.mod']\n",
        )
        .unwrap();

        let registry = ProfileRegistry::load(temp.path()).unwrap();
        assert_eq!(ids(&registry), vec!["go", "python", "nodejs", "cpp"]);
    }

    #[test]
    fn require_unknown_profile_errors() {
        let registry = ProfileRegistry::from_profiles(vec![]);
        assert!(registry.is_empty());
        let err = registry.require("cobol").unwrap_err();
        assert!(matches!(err, StackupError::UnknownProfile { .. }));
    }
}
