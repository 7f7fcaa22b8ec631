//! The setup state machine.
//!
//! A run moves strictly forward:
//!
//! ```text
//! Idle → Detecting → ExtensionsStep → ToolsStep → DependenciesStep → SettingsStep → Complete
//! ```
//!
//! Only two transitions can stop a run early: a missing workspace
//! (`NoWorkspace`) and a workspace no profile matches (`NoProfileDetected`).
//! Every later step proceeds whatever the previous one produced; missing
//! tools are recorded, not fatal. Nothing is retried.

use std::path::{Path, PathBuf};

use crate::detection::{ProfileMatcher, WorkspaceSearch};
use crate::error::Result;
use crate::profiles::{Profile, ProfileRegistry};
use crate::shell::{ShellRunner, TerminalDispatcher};
use crate::tools::{RemediationEvent, RemediationSink, ToolChecker, ToolGate, ToolReport, ToolStatus};
use crate::ui::{PromptOption, Prompt, UserInterface};

use super::dependencies::{DependencyInstaller, StepReport};
use super::extensions::{recommend_extensions, ExtensionHost, ExtensionOutcome};
use super::settings::{parse_settings, render_settings, SettingsApplier, SettingsStore};

/// Steps shown as progress, between detection and completion.
const STEP_COUNT: usize = 4;

/// States of a setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Idle,
    Detecting,
    ExtensionsStep,
    ToolsStep,
    DependenciesStep,
    SettingsStep,
    Complete,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Every step ran.
    Complete {
        /// Id of the profile that was set up
        profile_id: String,
        /// Display name of the profile
        profile_name: String,
        /// Whether every required tool was found
        tools_ready: bool,
    },
    /// There was no workspace to set up.
    NoWorkspace,
    /// No profile matched the workspace.
    NoProfileDetected,
}

impl SetupOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, SetupOutcome::Complete { .. })
    }
}

/// Everything a run did.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub outcome: SetupOutcome,
    /// States visited, in order
    pub states: Vec<SetupState>,
    pub tools_ready: bool,
    pub per_tool: Vec<ToolReport>,
    /// `None` when the run stopped before the extension step
    pub extensions: Option<ExtensionOutcome>,
    pub install_steps: Vec<StepReport>,
    pub settings_applied: bool,
}

impl SetupReport {
    fn new() -> Self {
        Self {
            outcome: SetupOutcome::NoWorkspace,
            states: Vec::new(),
            tools_ready: false,
            per_tool: Vec::new(),
            extensions: None,
            install_steps: Vec::new(),
            settings_applied: false,
        }
    }

    fn enter(&mut self, state: SetupState) {
        tracing::debug!("setup state: {:?}", state);
        self.states.push(state);
    }
}

/// The external services a run talks to.
pub struct Collaborators<'a> {
    pub search: &'a dyn WorkspaceSearch,
    pub shell: &'a dyn ShellRunner,
    pub dispatcher: &'a mut dyn TerminalDispatcher,
    pub extensions: &'a mut dyn ExtensionHost,
    pub settings: &'a mut dyn SettingsStore,
    pub ui: &'a mut dyn UserInterface,
}

/// Drives one setup run over a profile registry.
pub struct SetupOrchestrator<'a> {
    registry: &'a ProfileRegistry,
    workspace_root: PathBuf,
    exclude: Option<String>,
    forced_profile: Option<String>,
}

impl<'a> SetupOrchestrator<'a> {
    pub fn new(registry: &'a ProfileRegistry, workspace_root: &Path) -> Self {
        Self {
            registry,
            workspace_root: workspace_root.to_path_buf(),
            exclude: None,
            forced_profile: None,
        }
    }

    /// Skip files matching `exclude` during detection.
    pub fn with_exclude(mut self, exclude: Option<&str>) -> Self {
        self.exclude = exclude.map(str::to_string);
        self
    }

    /// Use this profile instead of detecting one.
    pub fn with_profile(mut self, profile_id: Option<&str>) -> Self {
        self.forced_profile = profile_id.map(str::to_string);
        self
    }

    /// Run setup from `Idle`.
    ///
    /// Only a forced profile id that the registry does not know is an error;
    /// everything else ends in a [`SetupOutcome`].
    pub fn run(&self, c: Collaborators<'_>) -> Result<SetupReport> {
        let Collaborators {
            search,
            shell,
            dispatcher,
            extensions,
            settings,
            ui,
        } = c;
        let mut report = SetupReport::new();
        report.enter(SetupState::Idle);

        if !self.workspace_root.is_dir() {
            ui.warning(&format!(
                "No workspace found at {}. Open a project folder and try again.",
                self.workspace_root.display()
            ));
            report.outcome = SetupOutcome::NoWorkspace;
            return Ok(report);
        }

        report.enter(SetupState::Detecting);
        let Some(profile) = self.detect(search, ui)? else {
            report.outcome = SetupOutcome::NoProfileDetected;
            return Ok(report);
        };
        ui.show_header(&format!("{} project setup", profile.name));

        report.enter(SetupState::ExtensionsStep);
        ui.show_progress(1, STEP_COUNT);
        report.extensions = Some(recommend_extensions(profile, extensions, ui));

        report.enter(SetupState::ToolsStep);
        ui.show_progress(2, STEP_COUNT);
        let checker = ToolChecker::new(shell, &self.workspace_root);
        let gate = ToolGate::new(&checker).verify(profile, &mut UiRemediation { ui: &mut *ui });
        if !gate.all_ready {
            ui.warning(
                "Some required system tools are not available. \
                 Please install them manually then re-run the setup.",
            );
        }
        report.tools_ready = gate.all_ready;
        report.per_tool = gate.per_tool;

        report.enter(SetupState::DependenciesStep);
        ui.show_progress(3, STEP_COUNT);
        report.install_steps = DependencyInstaller::new(dispatcher).run(
            profile,
            &self.workspace_root,
            &mut |key, question| match ui.confirm(key, question, false) {
                Ok(answer) => answer,
                Err(e) => {
                    ui.warning(&format!("Could not ask about install step: {}", e));
                    false
                }
            },
        );

        report.enter(SetupState::SettingsStep);
        ui.show_progress(4, STEP_COUNT);
        report.settings_applied = apply_settings(profile, settings, ui);

        report.enter(SetupState::Complete);
        if report.tools_ready {
            ui.success(&format!("{} setup complete.", profile.name));
        } else {
            ui.warning(&format!(
                "{} setup finished, but some required tools are missing.",
                profile.name
            ));
        }
        report.outcome = SetupOutcome::Complete {
            profile_id: profile.id.clone(),
            profile_name: profile.name.clone(),
            tools_ready: report.tools_ready,
        };
        Ok(report)
    }

    fn detect(
        &self,
        search: &dyn WorkspaceSearch,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<&'a Profile>> {
        if let Some(id) = &self.forced_profile {
            let profile = self.registry.require(id)?;
            tracing::debug!("using configured profile '{}'", id);
            return Ok(Some(profile));
        }

        let mut spinner = ui.start_spinner("Detecting project type...");
        let matcher = ProfileMatcher::new(search, self.exclude.as_deref());
        match matcher.find_match(self.registry.profiles()) {
            Some(found) => {
                spinner.finish_success(&format!(
                    "Detected {} project ({})",
                    found.profile.name,
                    found.file.display()
                ));
                Ok(Some(found.profile))
            }
            None => {
                spinner.finish_skipped("No supported project type detected.");
                Ok(None)
            }
        }
    }
}

/// Reports tool results through the UI and offers remediation.
struct UiRemediation<'u> {
    ui: &'u mut dyn UserInterface,
}

impl UiRemediation<'_> {
    fn choose(&mut self, event: &RemediationEvent) -> String {
        let mut options = Vec::new();
        if !event.guide.trim().is_empty() {
            options.push(PromptOption::new("Show Install Guide", "guide"));
        }
        if event.download_url.is_some() {
            options.push(PromptOption::new("Download Page", "download"));
        }
        if options.is_empty() {
            return "dismiss".to_string();
        }
        options.push(PromptOption::new("Dismiss", "dismiss"));

        let prompt = Prompt::select(
            &format!("remediate_{}", event.tool),
            &format!("How would you like to resolve {}?", event.tool),
            options,
            "dismiss",
        );
        match self.ui.prompt(&prompt) {
            Ok(answer) => answer.as_string(),
            Err(e) => {
                self.ui
                    .warning(&format!("Could not ask about {}: {}", event.tool, e));
                "dismiss".to_string()
            }
        }
    }
}

impl RemediationSink for UiRemediation<'_> {
    fn remediate(&mut self, event: &RemediationEvent) {
        self.ui.warning(&event.message());

        match self.choose(event).as_str() {
            "guide" => self.ui.show_document(&event.guide_title(), &event.guide),
            "download" => {
                if let Some(url) = &event.download_url {
                    if let Err(e) = self.ui.open_url(url) {
                        self.ui
                            .warning(&format!("Could not open {}: {}", url, e));
                    }
                }
            }
            _ => {}
        }
    }

    fn tool_ready(&mut self, tool: &str, version: &str) {
        if self.ui.output_mode().shows_details() {
            let status = ToolStatus::Found {
                version: version.to_string(),
            };
            self.ui.success(&status.describe(tool));
        }
    }
}

/// Confirm and write merged settings. Returns whether they were written.
fn apply_settings(
    profile: &Profile,
    store: &mut dyn SettingsStore,
    ui: &mut dyn UserInterface,
) -> bool {
    if profile.settings.is_empty() {
        return false;
    }

    let question = format!(
        "Do you want to apply recommended workspace settings for {}? This will update {}.",
        profile.name,
        store.location()
    );
    match ui.confirm("apply_settings", &question, false) {
        Ok(true) => {}
        Ok(false) => return false,
        Err(e) => {
            ui.warning(&format!("Could not ask about settings: {}", e));
            return false;
        }
    }

    let existing = match store.read() {
        Ok(Some(bytes)) => {
            let parsed = parse_settings(&bytes);
            if parsed.is_none() {
                ui.warning(&format!(
                    "Existing settings in {} are not a JSON object and will be replaced.",
                    store.location()
                ));
            }
            parsed
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("could not read {}: {}", store.location(), e);
            ui.warning(&format!(
                "Could not read {}, starting from empty settings: {}",
                store.location(),
                e
            ));
            None
        }
    };

    let merged = SettingsApplier::apply(profile, existing.as_ref());
    let written = render_settings(&merged).and_then(|bytes| store.write(&bytes));
    match written {
        Ok(()) => {
            ui.success(&format!("Updated {}", store.location()));
            true
        }
        Err(e) => {
            ui.warning(&format!("Could not update {}: {}", store.location(), e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::FsWorkspace;
    use crate::error::StackupError;
    use crate::profiles::{InstallCondition, InstallStep, ToolCheck};
    use crate::ui::MockUI;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    /// Probe output by command; unknown commands fail like a missing binary.
    struct ProbeTable(Vec<(&'static str, &'static str)>);

    impl ShellRunner for ProbeTable {
        fn run_in_shell(&self, command: &str, _cwd: &Path) -> Result<String> {
            self.0
                .iter()
                .find(|(c, _)| *c == command)
                .map(|(_, out)| out.to_string())
                .ok_or_else(|| StackupError::CommandFailed {
                    command: command.to_string(),
                    code: Some(127),
                })
        }
    }

    #[derive(Default)]
    struct Dispatches(Vec<Vec<String>>);

    impl TerminalDispatcher for Dispatches {
        fn execute_in_terminal(&mut self, _name: &str, _cwd: &Path, commands: &[String]) -> Result<()> {
            self.0.push(commands.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Extensions {
        installed: BTreeSet<String>,
    }

    impl ExtensionHost for Extensions {
        fn list_installed(&self) -> Result<BTreeSet<String>> {
            Ok(self.installed.clone())
        }

        fn install(&mut self, ids: &[String]) -> Result<()> {
            self.installed.extend(ids.iter().cloned());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySettings {
        content: Option<Vec<u8>>,
        writes: usize,
        fail_read: bool,
        fail_write: bool,
    }

    fn denied() -> StackupError {
        StackupError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }

    impl SettingsStore for MemorySettings {
        fn read(&self) -> Result<Option<Vec<u8>>> {
            if self.fail_read {
                return Err(denied());
            }
            Ok(self.content.clone())
        }

        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            if self.fail_write {
                return Err(denied());
            }
            self.writes += 1;
            self.content = Some(bytes.to_vec());
            Ok(())
        }

        fn location(&self) -> String {
            ".vscode/settings.json".to_string()
        }
    }

    fn python() -> Profile {
        Profile::new("python", "Python")
            .with_pattern("**/requirements.txt")
            .with_pattern("**/*.py")
            .with_tool(ToolCheck {
                name: "Python Interpreter".to_string(),
                command: "python3 --version".to_string(),
                min_version: Some("3.9.0".to_string()),
                install_guide: "Install Python 3.9 or newer.".to_string(),
                download_url: Some("https://www.python.org/downloads/".to_string()),
                ..Default::default()
            })
            .with_extension("ms-python.python")
            .with_install_step(InstallStep {
                prompt: "Install Python dependencies?".to_string(),
                command: "pip install -r requirements.txt".to_string(),
                detection_file: "requirements.txt".to_string(),
                condition: InstallCondition::FileExists,
                pre_commands: vec!["python3 -m venv .venv".to_string()],
            })
            .with_setting("python.terminal.activateEnvironment", json!(true))
    }

    fn nodejs() -> Profile {
        Profile::new("nodejs", "Node.js")
            .with_pattern("**/package.json")
            .with_tool(ToolCheck {
                name: "Node.js Runtime".to_string(),
                command: "node --version".to_string(),
                ..Default::default()
            })
    }

    struct Fixture {
        temp: TempDir,
        registry: ProfileRegistry,
        shell: ProbeTable,
        dispatcher: Dispatches,
        extensions: Extensions,
        settings: MemorySettings,
        ui: MockUI,
    }

    impl Fixture {
        fn new(files: &[&str]) -> Self {
            let temp = TempDir::new().unwrap();
            for file in files {
                fs::write(temp.path().join(file), "").unwrap();
            }
            Self {
                temp,
                registry: ProfileRegistry::from_profiles(vec![python(), nodejs()]),
                shell: ProbeTable(Vec::new()),
                dispatcher: Dispatches::default(),
                extensions: Extensions::default(),
                settings: MemorySettings::default(),
                ui: MockUI::new(),
            }
        }

        fn run_at(&mut self, root: &Path, forced: Option<&str>) -> Result<SetupReport> {
            let workspace = FsWorkspace::new(root);
            SetupOrchestrator::new(&self.registry, root)
                .with_exclude(Some("**/node_modules/**"))
                .with_profile(forced)
                .run(Collaborators {
                    search: &workspace,
                    shell: &self.shell,
                    dispatcher: &mut self.dispatcher,
                    extensions: &mut self.extensions,
                    settings: &mut self.settings,
                    ui: &mut self.ui,
                })
        }

        fn run(&mut self) -> SetupReport {
            let root = self.temp.path().to_path_buf();
            self.run_at(&root, None).unwrap()
        }
    }

    #[test]
    fn python_workspace_completes_without_python() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        let report = fixture.run();

        assert_eq!(
            report.states,
            vec![
                SetupState::Idle,
                SetupState::Detecting,
                SetupState::ExtensionsStep,
                SetupState::ToolsStep,
                SetupState::DependenciesStep,
                SetupState::SettingsStep,
                SetupState::Complete,
            ]
        );
        assert_eq!(
            report.outcome,
            SetupOutcome::Complete {
                profile_id: "python".to_string(),
                profile_name: "Python".to_string(),
                tools_ready: false,
            }
        );
        assert_eq!(report.per_tool[0].status, ToolStatus::NotFound);
        assert!(fixture
            .ui
            .has_warning("Some required system tools are not available."));
        assert!(fixture
            .ui
            .has_warning("Please install them manually then re-run the setup."));
        assert!(fixture
            .ui
            .has_warning("Python Interpreter not found. Please install it."));
    }

    #[test]
    fn missing_workspace_exits_early() {
        let mut fixture = Fixture::new(&[]);
        let gone = fixture.temp.path().join("gone");
        let report = fixture.run_at(&gone, None).unwrap();

        assert_eq!(report.outcome, SetupOutcome::NoWorkspace);
        assert_eq!(report.states, vec![SetupState::Idle]);
        assert!(report.extensions.is_none());
    }

    #[test]
    fn unmatched_workspace_exits_early() {
        let mut fixture = Fixture::new(&["README.md"]);
        let report = fixture.run();

        assert_eq!(report.outcome, SetupOutcome::NoProfileDetected);
        assert_eq!(report.states, vec![SetupState::Idle, SetupState::Detecting]);
        assert!(fixture.ui.prompts_shown().is_empty());
    }

    #[test]
    fn declining_everything_has_no_side_effects() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        let report = fixture.run();

        assert_eq!(
            report.extensions,
            Some(ExtensionOutcome::Declined(vec!["ms-python.python".to_string()]))
        );
        assert!(fixture.dispatcher.0.is_empty());
        assert!(!report.settings_applied);
        assert_eq!(fixture.settings.writes, 0);
        assert!(fixture.ui.opened_urls().is_empty());
    }

    #[test]
    fn accepting_everything_dispatches_and_writes() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.shell = ProbeTable(vec![("python3 --version", "Python 3.11.4")]);
        fixture.settings.content = Some(br#"{"editor.fontSize": 14}"#.to_vec());
        fixture.ui.set_default_prompt_response("yes");

        let report = fixture.run();

        assert!(report.tools_ready);
        assert!(matches!(
            report.extensions,
            Some(ExtensionOutcome::Installed(_))
        ));
        assert_eq!(
            fixture.dispatcher.0,
            vec![vec![
                "python3 -m venv .venv".to_string(),
                "pip install -r requirements.txt".to_string()
            ]]
        );
        assert!(report.settings_applied);
        let written: Value =
            serde_json::from_slice(fixture.settings.content.as_ref().unwrap()).unwrap();
        assert_eq!(
            written,
            json!({"editor.fontSize": 14, "python.terminal.activateEnvironment": true})
        );
        assert!(fixture.ui.has_success("Python setup complete."));
    }

    #[test]
    fn remediation_guide_and_download() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.shell = ProbeTable(vec![("python3 --version", "Python 3.8.10")]);
        fixture
            .ui
            .queue_prompt_responses("remediate_Python Interpreter", vec!["guide"]);

        fixture.run();
        assert_eq!(
            fixture.ui.documents()[0].0,
            "Python Interpreter Upgrade Guide"
        );
        assert!(fixture.ui.has_warning(
            "Python Interpreter version 3.8.10 found, but minimum required is 3.9.0. Please upgrade."
        ));

        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture
            .ui
            .set_prompt_response("remediate_Python Interpreter", "download");
        fixture.run();
        assert_eq!(
            fixture.ui.opened_urls(),
            ["https://www.python.org/downloads/"]
        );
    }

    #[test]
    fn tool_without_guide_or_url_is_not_prompted() {
        let mut fixture = Fixture::new(&["package.json"]);
        let report = fixture.run();

        assert!(!report.tools_ready);
        assert!(!fixture
            .ui
            .prompts_shown()
            .iter()
            .any(|k| k.starts_with("remediate_")));
    }

    #[test]
    fn forced_profile_skips_detection() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        let root = fixture.temp.path().to_path_buf();
        let report = fixture.run_at(&root, Some("nodejs")).unwrap();

        assert!(matches!(
            report.outcome,
            SetupOutcome::Complete { ref profile_id, .. } if profile_id == "nodejs"
        ));
        assert!(fixture.ui.spinners().is_empty());
    }

    #[test]
    fn unknown_forced_profile_is_an_error() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        let root = fixture.temp.path().to_path_buf();
        let err = fixture.run_at(&root, Some("cobol")).unwrap_err();
        assert!(matches!(err, StackupError::UnknownProfile { .. }));
    }

    #[test]
    fn prompt_failures_degrade_to_decline() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.ui.fail_prompt("install_step_1");
        fixture.ui.fail_prompt("apply_settings");

        let report = fixture.run();

        assert!(report.outcome.is_complete());
        assert!(fixture.dispatcher.0.is_empty());
        assert!(!report.settings_applied);
        assert!(fixture.ui.has_warning("Could not ask about install step"));
        assert!(fixture.ui.has_warning("Could not ask about settings"));
    }

    #[test]
    fn unparsable_settings_are_replaced() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.settings.content = Some(b"{ // jsonc\n}".to_vec());
        fixture.ui.set_prompt_response("apply_settings", "yes");

        let report = fixture.run();

        assert!(report.settings_applied);
        assert!(fixture.ui.has_warning("not a JSON object"));
        let written: Value =
            serde_json::from_slice(fixture.settings.content.as_ref().unwrap()).unwrap();
        assert_eq!(written, json!({"python.terminal.activateEnvironment": true}));
    }

    #[test]
    fn unreadable_settings_count_as_empty() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.settings.content = Some(br#"{"editor.tabSize": 2}"#.to_vec());
        fixture.settings.fail_read = true;
        fixture.ui.set_prompt_response("apply_settings", "yes");

        let report = fixture.run();

        assert!(report.settings_applied);
        assert!(fixture.ui.has_warning("Could not read .vscode/settings.json"));
        assert_eq!(fixture.settings.writes, 1);
        let written: Value =
            serde_json::from_slice(fixture.settings.content.as_ref().unwrap()).unwrap();
        assert_eq!(written, json!({"python.terminal.activateEnvironment": true}));
    }

    #[test]
    fn settings_write_failure_degrades_to_warning() {
        let mut fixture = Fixture::new(&["requirements.txt"]);
        fixture.settings.fail_write = true;
        fixture.ui.set_prompt_response("apply_settings", "yes");

        let report = fixture.run();

        assert!(!report.settings_applied);
        assert!(report.outcome.is_complete());
        assert_eq!(report.states.last(), Some(&SetupState::Complete));
        assert!(fixture.ui.has_warning("Could not update .vscode/settings.json"));
        assert!(!fixture.ui.has_success("Updated"));
        assert!(fixture.settings.content.is_none());
    }
}
