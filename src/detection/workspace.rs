//! Workspace file search.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::glob::Glob;

/// Finds files in a workspace by glob.
pub trait WorkspaceSearch {
    /// Up to `max_results` files matching `pattern` and not matching `exclude`.
    ///
    /// Search failures yield fewer (or no) results rather than an error.
    fn find(&self, pattern: &str, exclude: Option<&str>, max_results: usize) -> Vec<PathBuf>;
}

/// Searches a directory tree on disk.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether there is a workspace to set up at all.
    pub fn is_open(&self) -> bool {
        self.root.is_dir()
    }
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Regular files and symlinks that resolve to one. Links are not followed
/// during the walk, so directory cycles cannot occur.
fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

impl WorkspaceSearch for FsWorkspace {
    fn find(&self, pattern: &str, exclude: Option<&str>, max_results: usize) -> Vec<PathBuf> {
        let glob = Glob::new(pattern);
        let exclude = exclude.filter(|e| !e.trim().is_empty()).map(Glob::new);
        let root = self.root.as_path();
        let mut found = Vec::new();

        if max_results == 0 || !self.is_open() {
            return found;
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if is_git_dir(entry) {
                    return false;
                }
                if !entry.file_type().is_dir() {
                    return true;
                }
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                !exclude.as_ref().is_some_and(|ex| ex.covers_dir(relative))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("skipping entry under {}: {}", root.display(), err);
                    continue;
                }
            };
            if !is_file(&entry) {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if !glob.matches_path(relative) {
                continue;
            }
            if exclude.as_ref().is_some_and(|ex| ex.matches_path(relative)) {
                continue;
            }

            found.push(entry.path().to_path_buf());
            if found.len() >= max_results {
                break;
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_nested_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "services/api/requirements.txt");

        let workspace = FsWorkspace::new(temp.path());
        let found = workspace.find("**/requirements.txt", None, 1);

        assert_eq!(
            found,
            vec![temp.path().join("services/api/requirements.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_found() {
        let temp = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        touch(elsewhere.path(), "requirements.txt");
        std::os::unix::fs::symlink(
            elsewhere.path().join("requirements.txt"),
            temp.path().join("requirements.txt"),
        )
        .unwrap();

        let workspace = FsWorkspace::new(temp.path());
        let found = workspace.find("**/requirements.txt", None, 1);

        assert_eq!(found, vec![temp.path().join("requirements.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_walked() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "real/main.py");
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("loop")).unwrap();

        let workspace = FsWorkspace::new(temp.path());
        let found = workspace.find("**/*.py", None, 10);

        assert_eq!(found, vec![temp.path().join("real/main.py")]);
    }

    #[test]
    fn respects_max_results() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.py");
        touch(temp.path(), "b.py");
        touch(temp.path(), "c.py");

        let workspace = FsWorkspace::new(temp.path());
        assert_eq!(workspace.find("*.py", None, 1).len(), 1);
        assert_eq!(workspace.find("*.py", None, 10).len(), 3);
        assert!(workspace.find("*.py", None, 0).is_empty());
    }

    #[test]
    fn excluded_directories_are_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "node_modules/lodash/package.json");

        let workspace = FsWorkspace::new(temp.path());
        assert!(workspace
            .find("**/package.json", Some("**/node_modules/**"), 1)
            .is_empty());
        assert_eq!(workspace.find("**/package.json", None, 1).len(), 1);
    }

    #[test]
    fn git_directory_is_never_searched() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".git/hooks/pre-commit.py");

        let workspace = FsWorkspace::new(temp.path());
        assert!(workspace.find("**/*.py", None, 1).is_empty());
    }

    #[test]
    fn missing_root_finds_nothing() {
        let temp = TempDir::new().unwrap();
        let workspace = FsWorkspace::new(temp.path().join("gone"));

        assert!(!workspace.is_open());
        assert!(workspace.find("**/*", None, 5).is_empty());
    }
}
