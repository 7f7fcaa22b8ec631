//! Project stack detection.
//!
//! Walks the workspace looking for files that identify a profile, such as
//! `requirements.txt` for Python or `CMakeLists.txt` for C/C++.

pub mod glob;
pub mod matcher;
pub mod workspace;

pub use glob::Glob;
pub use matcher::{ProfileMatch, ProfileMatcher};
pub use workspace::{FsWorkspace, WorkspaceSearch};
