//! Language/tooling stack profiles.
//!
//! Profiles are data. Built-in ones are YAML files embedded in the binary
//! and ordered by `profiles/registry.yml`; projects can add their own in
//! `.stackup/profiles/`.
//!
//! # Example
//!
//! ```
//! use stackup::profiles::ProfileRegistry;
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//! let python = registry.get("python").unwrap();
//! assert_eq!(python.name, "Python");
//! ```

pub mod builtin;
pub mod local;
pub mod manifest;
pub mod registry;
pub mod schema;

pub use local::{load_local_profiles, local_profiles_dir};
pub use manifest::ProfileManifest;
pub use registry::ProfileRegistry;
pub use schema::{Detection, InstallCondition, InstallStep, Profile, ToolCheck};
