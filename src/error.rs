//! Error types for stackup operations.
//!
//! This module defines [`StackupError`], the error type used for genuinely
//! unexpected failures, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Expected absences (no workspace, no matching profile, missing tool,
//!   missing detection file, unreadable settings) are ordinary control flow
//!   and never surface as a `StackupError`
//! - Use `StackupError` for broken profile data, broken config and I/O that
//!   the run cannot recover from
//! - Use `anyhow::Error` (via `StackupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stackup operations.
#[derive(Debug, Error)]
pub enum StackupError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a profile definition.
    #[error("Failed to parse profile at {path}: {message}")]
    ProfileParseError { path: PathBuf, message: String },

    /// A profile id was requested that no registry source defines.
    #[error("Unknown profile: {id}")]
    UnknownProfile { id: String },

    /// Shell command could not be started or did not finish.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Shell command ran past its allowed wait and was killed.
    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    /// A collaborator (editor CLI, prompt, opener) reported a failure.
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for stackup operations.
pub type Result<T> = std::result::Result<T, StackupError>;
