//! Profile detection.
//!
//! Profiles are tried in registry order and each profile's patterns in
//! declaration order. The first pattern with a hit decides, so earlier
//! profiles win ties: a repo with both `main.py` and `main.js` is a Python
//! project when Python is listed first.

use std::path::PathBuf;

use serde::Serialize;

use crate::profiles::Profile;

use super::workspace::WorkspaceSearch;

/// Why a profile was picked.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileMatch<'p> {
    /// The matched profile
    #[serde(skip)]
    pub profile: &'p Profile,
    /// Id of the matched profile
    pub profile_id: String,
    /// Pattern that produced the hit
    pub pattern: String,
    /// First file that matched
    pub file: PathBuf,
}

/// First-match-wins profile detection.
pub struct ProfileMatcher<'a> {
    search: &'a dyn WorkspaceSearch,
    exclude: Option<String>,
}

impl<'a> ProfileMatcher<'a> {
    /// Create a matcher over `search`, skipping files matching `exclude`.
    pub fn new(search: &'a dyn WorkspaceSearch, exclude: Option<&str>) -> Self {
        Self {
            search,
            exclude: exclude.map(str::to_string),
        }
    }

    /// Find the first profile with a matching file in the workspace.
    pub fn find_match<'p>(&self, profiles: &'p [Profile]) -> Option<ProfileMatch<'p>> {
        for profile in profiles {
            for pattern in profile.file_patterns() {
                let hits = self.search.find(pattern, self.exclude.as_deref(), 1);
                if let Some(file) = hits.into_iter().next() {
                    tracing::debug!(
                        "detected profile '{}' via {} ({})",
                        profile.id,
                        pattern,
                        file.display()
                    );
                    return Some(ProfileMatch {
                        profile,
                        profile_id: profile.id.clone(),
                        pattern: pattern.clone(),
                        file,
                    });
                }
            }
            tracing::debug!("profile '{}' not detected", profile.id);
        }
        None
    }
}
