//! Tool presence and version checks.
//!
//! - [`version`] extracts and compares dotted versions
//! - [`checker`] runs a single probe command
//! - [`gate`] verifies every tool a profile needs

pub mod checker;
pub mod gate;
pub mod status;
pub mod version;

pub use checker::{classify, ToolChecker};
pub use gate::{GateReport, RemediationEvent, RemediationSink, ToolGate, ToolReport};
pub use status::ToolStatus;
pub use version::{compare_versions, extract_version, meets_minimum};
