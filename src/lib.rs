//! Stackup - Detect a project's language stack and set up the workspace.
//!
//! Stackup looks at the files in a workspace, picks the first matching
//! profile (Python, Node.js, C/C++ or a project-local one), and walks the
//! user through recommended editor extensions, required tools, dependency
//! install steps and editor settings.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration loading
//! - [`detection`] - Workspace search and profile matching
//! - [`error`] - Error types and result aliases
//! - [`profiles`] - Profile data and the profile registry
//! - [`setup`] - Setup steps and the orchestrating state machine
//! - [`shell`] - Shell command execution and dispatch
//! - [`tools`] - Tool probes, version comparison and the tool gate
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use stackup::detection::{FsWorkspace, ProfileMatcher};
//! use stackup::profiles::ProfileRegistry;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! std::fs::write(temp.path().join("requirements.txt"), "requests\n").unwrap();
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//! let workspace = FsWorkspace::new(temp.path());
//! let found = ProfileMatcher::new(&workspace, Some("**/node_modules/**"))
//!     .find_match(registry.profiles())
//!     .unwrap();
//! assert_eq!(found.profile_id, "python");
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod profiles;
pub mod setup;
pub mod shell;
pub mod tools;
pub mod ui;

pub use error::{Result, StackupError};
