//! Workspace setup.
//!
//! [`SetupOrchestrator`] runs the whole flow; the step modules can also be
//! used on their own.

pub mod dependencies;
pub mod extensions;
pub mod orchestrator;
pub mod settings;

pub use dependencies::{condition_holds, context_name, DependencyInstaller, StepOutcome, StepReport};
pub use extensions::{
    missing_extensions, parse_extension_list, recommend_extensions, EditorCli, ExtensionHost,
    ExtensionOutcome,
};
pub use orchestrator::{Collaborators, SetupOrchestrator, SetupOutcome, SetupReport, SetupState};
pub use settings::{
    merge_settings, parse_settings, render_settings, FileSettingsStore, SettingsApplier,
    SettingsStore,
};
