//! Chart repositories, their packages and the versions of one package.

use super::{check_namespace, check_release, drive_wizard, is_no, is_yes, namespace_or_default, WizardKey};
use crate::constants::{
    HELP_REPOSITORIES, HELP_WIZARD, NO_SELECTION_PACKAGE, NO_SELECTION_REPOSITORY, NO_SELECTION_VERSION,
};
use crate::helm::{HelmCommand, HelmError, Payload, Row};
use crate::ui::components::wizard_view::render_wizard;
use crate::ui::components::{Notice, TablePanel};
use crate::ui::core::actions::{self, EditorRequest, Effect, Operation, Request};
use crate::ui::core::wizard::{Advance, Branch, StepKind, Wizard};
use crate::ui::core::{Component, FocusManager, RefreshCoordinator, TabContext};
use crate::ui::layout::{ColumnSpec, LayoutManager};
use crate::workspace::Workspace;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

pub const REPOSITORY_COLUMNS: &[ColumnSpec] = &[ColumnSpec::flex("Name", 1), ColumnSpec::flex("URL", 3)];

pub const PACKAGE_COLUMNS: &[ColumnSpec] = &[ColumnSpec::flex("Name", 1)];

pub const VERSION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::fixed("Chart Version", 13),
    ColumnSpec::fixed("App Version", 13),
    ColumnSpec::flex("Description", 1),
];

const REPO_NAME: usize = 0;
const PACKAGE_NAME: usize = 0;
const VERSION: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Repositories,
    Packages,
    Versions,
    Add,
    Remove,
    Update,
    Install { release: String, namespace: String },
}

/// Panels left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Repositories,
    Packages,
    Versions,
}

impl Pane {
    const ORDER: [Pane; 3] = [Pane::Repositories, Pane::Packages, Pane::Versions];

    fn next(self) -> Self {
        Self::ORDER[(self as usize + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self as usize + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoWizard {
    Add,
    Install,
}

pub struct AddContext;

pub struct InstallContext {
    workspace: Workspace,
    chart: String,
    version: String,
}

pub const ADD_NAME: usize = 0;
pub const ADD_URL: usize = 1;

pub const INSTALL_RELEASE: usize = 0;
pub const INSTALL_NAMESPACE: usize = 1;
pub const INSTALL_VALUES: usize = 2;

fn add_operation(_: &AddContext, values: &[String]) -> Operation {
    HelmCommand::RepoAdd {
        name: values[ADD_NAME].clone(),
        url: values[ADD_URL].clone(),
    }
    .into()
}

fn install_values_branch(ctx: &InstallContext, values: &[String], answer: &str) -> Option<Branch> {
    if is_no(answer) {
        return Some(Branch::Continue);
    }
    if !is_yes(answer) {
        return None;
    }
    let namespace = namespace_or_default(&values[INSTALL_NAMESPACE]);
    Some(Branch::Edit(EditorRequest {
        source: HelmCommand::ShowValues {
            chart: ctx.chart.clone(),
            version: ctx.version.clone(),
        }
        .into(),
        path: ctx.workspace.values_file(&namespace, &values[INSTALL_RELEASE])?,
    }))
}

fn install_operation(ctx: &InstallContext, values: &[String]) -> Operation {
    let namespace = namespace_or_default(&values[INSTALL_NAMESPACE]);
    let release = values[INSTALL_RELEASE].clone();
    HelmCommand::Install {
        values: is_yes(&values[INSTALL_VALUES])
            .then(|| ctx.workspace.values_file(&namespace, &release))
            .flatten(),
        release,
        chart: ctx.chart.clone(),
        version: ctx.version.clone(),
        namespace,
    }
    .into()
}

fn target(t: Target) -> actions::Target {
    actions::Target::Repositories(t)
}

pub struct RepositoriesTab {
    workspace: Workspace,
    repositories: TablePanel,
    packages: TablePanel,
    versions: TablePanel,
    add: Wizard<AddContext>,
    install: Wizard<InstallContext>,
    wizard: Option<RepoWizard>,
    focus: FocusManager<Pane, RepoWizard>,
}

impl RepositoriesTab {
    pub fn new(ctx: &TabContext) -> Self {
        let add = Wizard::new("Add repository", add_operation, ctx.debounce)
            .step("Repository name", StepKind::Text)
            .step("Repository URL", StepKind::Text);

        let install = Wizard::new("Install chart", install_operation, ctx.debounce)
            .step("Release name", StepKind::Text)
            .checked(check_release)
            .step("Namespace (empty for default)", StepKind::Text)
            .checked(check_namespace)
            .step("Edit values? y/n", StepKind::Branch(install_values_branch))
            .step("Press enter to install", StepKind::Confirm);

        let mut tab = Self {
            workspace: ctx.workspace.clone(),
            repositories: TablePanel::new("Repositories", REPOSITORY_COLUMNS),
            packages: TablePanel::new("Packages", PACKAGE_COLUMNS),
            versions: TablePanel::new("Versions", VERSION_COLUMNS),
            add,
            install,
            wizard: None,
            focus: FocusManager::new(Pane::Repositories),
        };
        tab.sync_focus();
        tab
    }

    pub fn repositories(&self) -> &TablePanel {
        &self.repositories
    }

    pub fn packages(&self) -> &TablePanel {
        &self.packages
    }

    pub fn versions(&self) -> &TablePanel {
        &self.versions
    }

    pub fn focus(&self) -> &FocusManager<Pane, RepoWizard> {
        &self.focus
    }

    pub fn wizard(&self) -> Option<RepoWizard> {
        self.wizard
    }

    fn panel_mut(&mut self, pane: Pane) -> &mut TablePanel {
        match pane {
            Pane::Repositories => &mut self.repositories,
            Pane::Packages => &mut self.packages,
            Pane::Versions => &mut self.versions,
        }
    }

    fn sync_focus(&mut self) {
        for pane in Pane::ORDER {
            let focused = self.focus.is_panel_focused(pane);
            self.panel_mut(pane).set_focused(focused);
        }
    }

    fn refresh(&mut self) -> Request {
        let tag = self.repositories.begin_load();
        Request::new(target(Target::Repositories), tag, HelmCommand::RepoList)
    }

    /// Packages of the selected repository. Versions wait for the packages.
    fn load_packages(&mut self) -> Vec<Effect> {
        self.versions.invalidate();
        let selected: Option<Row> = self.repositories.selected_row().cloned();
        if selected.is_none() {
            self.packages.invalidate();
        }
        RefreshCoordinator::fan_out(&[Pane::Packages], selected.as_ref(), |_, row| {
            let tag = self.packages.begin_load();
            let repo = row[REPO_NAME].clone();
            Request::new(target(Target::Packages), tag, HelmCommand::RepoPackages { repo })
        })
    }

    fn load_versions(&mut self) -> Vec<Effect> {
        let selected: Option<Row> = self.packages.selected_row().cloned();
        if selected.is_none() {
            self.versions.invalidate();
        }
        RefreshCoordinator::fan_out(&[Pane::Versions], selected.as_ref(), |_, row| {
            let tag = self.versions.begin_load();
            let chart = row[PACKAGE_NAME].clone();
            Request::new(target(Target::Versions), tag, HelmCommand::ChartVersions { chart })
        })
    }

    fn selected_repository(&mut self) -> Option<String> {
        let name = self.repositories.selected_cell(REPO_NAME).map(str::to_string);
        if name.is_none() {
            self.repositories
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_REPOSITORY)));
        }
        name
    }

    fn remove(&mut self) -> Vec<Effect> {
        let Some(name) = self.selected_repository() else {
            return Vec::new();
        };
        log::info!("Repositories: removing {}", name);
        vec![Effect::Dispatch(Request::new(target(Target::Remove), 0, HelmCommand::RepoRemove { name }))]
    }

    fn update(&mut self) -> Vec<Effect> {
        let Some(name) = self.selected_repository() else {
            return Vec::new();
        };
        log::info!("Repositories: updating {}", name);
        vec![Effect::Dispatch(Request::new(target(Target::Update), 0, HelmCommand::RepoUpdate { name }))]
    }

    fn open_install(&mut self) {
        let chart = self.packages.selected_cell(PACKAGE_NAME).map(str::to_string);
        let version = self.versions.selected_cell(VERSION).map(str::to_string);
        match (chart, version) {
            (Some(chart), Some(version)) => {
                self.install.open(InstallContext {
                    workspace: self.workspace.clone(),
                    chart,
                    version,
                });
                self.open_wizard(RepoWizard::Install);
            }
            (None, _) => self
                .packages
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_PACKAGE))),
            (_, None) => self
                .versions
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_VERSION))),
        }
    }

    fn open_wizard(&mut self, wizard: RepoWizard) {
        self.wizard = Some(wizard);
        self.focus.focus_input(wizard);
        self.sync_focus();
    }

    fn close_wizard(&mut self) {
        self.wizard = None;
        self.focus.return_to_primary();
        self.sync_focus();
    }

    fn handle_wizard_key(&mut self, wizard: RepoWizard, key: KeyEvent) -> Vec<Effect> {
        // Neither wizard has suggesting steps
        let unused = |_: usize| target(Target::Packages);
        let result = match wizard {
            RepoWizard::Add => drive_wizard(&mut self.add, key, unused),
            RepoWizard::Install => drive_wizard(&mut self.install, key, unused),
        };

        match result {
            WizardKey::Effects(effects) => effects,
            WizardKey::Cancelled => {
                self.close_wizard();
                Vec::new()
            }
            WizardKey::Completed(operation) => {
                self.close_wizard();
                let t = match &operation {
                    Operation::Helm(HelmCommand::Install { release, namespace, .. }) => Target::Install {
                        release: release.clone(),
                        namespace: namespace.clone(),
                    },
                    _ => Target::Add,
                };
                log::info!("Repositories: {}", operation.describe());
                vec![Effect::Dispatch(Request::new(target(t), 0, operation))]
            }
        }
    }

    fn handle_panel_key(&mut self, pane: Pane, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab | KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                self.focus.focus_panel(pane.next());
                self.sync_focus();
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus.focus_panel(pane.previous());
                self.sync_focus();
                Vec::new()
            }
            KeyCode::Char('a') => {
                self.add.open(AddContext);
                self.open_wizard(RepoWizard::Add);
                Vec::new()
            }
            KeyCode::Char('i') => {
                self.open_install();
                Vec::new()
            }
            KeyCode::Char('d') => self.remove(),
            KeyCode::Char('u') => self.update(),
            KeyCode::Char('r') => vec![Effect::Dispatch(self.refresh())],
            _ => {
                if !self.panel_mut(pane).handle_key(key) {
                    return Vec::new();
                }
                match pane {
                    Pane::Repositories => self.load_packages(),
                    Pane::Packages => self.load_versions(),
                    Pane::Versions => Vec::new(),
                }
            }
        }
    }

    pub fn apply(&mut self, t: Target, tag: u64, result: Result<Payload, HelmError>) -> Vec<Effect> {
        match t {
            Target::Repositories => {
                if self.repositories.apply_load(tag, result) {
                    self.load_packages()
                } else {
                    Vec::new()
                }
            }
            Target::Packages => {
                if self.packages.apply_load(tag, result) {
                    self.load_versions()
                } else {
                    Vec::new()
                }
            }
            Target::Versions => {
                self.versions.apply_load(tag, result);
                Vec::new()
            }
            Target::Add => self.after_mutation("Repository added", result),
            Target::Remove => self.after_mutation("Repository removed", result),
            Target::Update => self.after_mutation("Repository updated", result),
            Target::Install { release, namespace } => {
                match &result {
                    Ok(_) => self.versions.set_notice(Notice::info(format!("Installed {}", release))),
                    Err(e) => self.versions.set_notice(Notice::from(e)),
                }
                self.workspace
                    .release_dir(&namespace, &release)
                    .map(Effect::RemoveDir)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn after_mutation(&mut self, done: &str, result: Result<Payload, HelmError>) -> Vec<Effect> {
        match &result {
            Ok(_) => self.repositories.set_notice(Notice::info(done)),
            Err(e) => self.repositories.set_notice(Notice::from(e)),
        }
        RefreshCoordinator::after_mutation(&result, || self.refresh())
    }
}

impl Component for RepositoriesTab {
    fn init(&mut self) -> Vec<Effect> {
        vec![Effect::Dispatch(self.refresh())]
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        if let Some(wizard) = self.wizard {
            return self.handle_wizard_key(wizard, key);
        }
        for pane in Pane::ORDER {
            self.panel_mut(pane).clear_notice();
        }
        let pane = self.focus.focused_panel().unwrap_or(Pane::Repositories);
        self.handle_panel_key(pane, key)
    }

    fn on_editor_finished(&mut self, result: Result<(), String>) -> Vec<Effect> {
        let advance = match self.wizard {
            Some(RepoWizard::Install) => self.install.resume(result),
            Some(RepoWizard::Add) | None => Advance::Inactive,
        };
        log::debug!("Repositories: editor finished, {:?}", advance);
        Vec::new()
    }

    fn resize(&mut self, _width: u16, height: u16) {
        for pane in Pane::ORDER {
            self.panel_mut(pane).set_viewport_height(height);
        }
    }

    fn captures_input(&self) -> bool {
        self.wizard.is_some()
    }

    fn help(&self) -> &'static str {
        if self.wizard.is_some() {
            HELP_WIZARD
        } else {
            HELP_REPOSITORIES
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::three_panel_layout(rect);
        self.repositories.render(f, areas[0]);
        self.packages.render(f, areas[1]);
        self.versions.render(f, areas[2]);

        let popup = LayoutManager::centered_rect(60, 60, rect);
        match self.wizard {
            Some(RepoWizard::Add) => render_wizard(f, popup, &self.add),
            Some(RepoWizard::Install) => render_wizard(f, popup, &self.install),
            None => {}
        }
    }
}
