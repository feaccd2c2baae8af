//! Installed releases: list, per-release detail views, install and upgrade.

use super::{check_namespace, check_release, drive_wizard, is_no, is_yes, namespace_or_default, WizardKey};
use crate::constants::{HELP_RELEASES_DETAIL, HELP_RELEASES_LIST, HELP_WIZARD, NO_SELECTION_RELEASE, NO_SELECTION_REVISION};
use crate::helm::commands::GetKind;
use crate::helm::{HelmCommand, HelmError, Payload, Row};
use crate::ui::components::wizard_view::render_wizard;
use crate::ui::components::{Notice, TablePanel, TextPanel};
use crate::ui::core::actions::{self, EditorRequest, Effect, Operation, Request};
use crate::ui::core::wizard::{Advance, Branch, StepKind, Wizard};
use crate::ui::core::{Component, FocusManager, RefreshCoordinator, SubView, TabContext, View, ViewState};
use crate::ui::layout::{ColumnSpec, LayoutManager};
use crate::workspace::Workspace;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Tabs,
    Frame,
};

pub const RELEASE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::flex("Name", 1),
    ColumnSpec::flex("Namespace", 1),
    ColumnSpec::fixed("Revision", 10),
    ColumnSpec::fixed("Updated", 36),
    ColumnSpec::flex("Status", 1),
    ColumnSpec::flex("Chart", 1),
    ColumnSpec::flex("App version", 1),
];

pub const HISTORY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::flex("Revision", 1),
    ColumnSpec::fixed("Updated", 36),
    ColumnSpec::flex("Status", 1),
    ColumnSpec::flex("Chart", 1),
    ColumnSpec::flex("App version", 1),
    ColumnSpec::flex("Description", 1),
];

const NAME: usize = 0;
const NAMESPACE: usize = 1;
const REVISION: usize = 0;

/// Detail sub-views of one release, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detail {
    History,
    Notes,
    Metadata,
    Hooks,
    Values,
    Manifest,
}

impl SubView for Detail {
    const ALL: &'static [Self] = &[
        Detail::History,
        Detail::Notes,
        Detail::Metadata,
        Detail::Hooks,
        Detail::Values,
        Detail::Manifest,
    ];

    fn title(self) -> &'static str {
        match self {
            Detail::History => "History",
            Detail::Notes => "Notes",
            Detail::Metadata => "Metadata",
            Detail::Hooks => "Hooks",
            Detail::Values => "Values",
            Detail::Manifest => "Manifest",
        }
    }
}

impl Detail {
    fn command(self, release: &str, namespace: &str) -> HelmCommand {
        let (release, namespace) = (release.to_string(), namespace.to_string());
        let kind = match self {
            Detail::History => return HelmCommand::History { release, namespace },
            Detail::Notes => GetKind::Notes,
            Detail::Metadata => GetKind::Metadata,
            Detail::Hooks => GetKind::Hooks,
            Detail::Values => GetKind::Values,
            Detail::Manifest => GetKind::Manifest,
        };
        HelmCommand::Get {
            kind,
            release,
            namespace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseWizard {
    Install,
    Upgrade,
}

/// Surfaces of this tab outcomes are addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    List,
    Detail(Detail),
    Suggestion { wizard: ReleaseWizard, step: usize },
    Uninstall,
    Rollback,
    Install { release: String, namespace: String },
    Upgrade { release: String, namespace: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Releases,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Wizard,
}

pub struct InstallContext {
    workspace: Workspace,
}

pub struct UpgradeContext {
    workspace: Workspace,
    release: String,
    namespace: String,
}

// Install steps
pub const INSTALL_RELEASE: usize = 0;
pub const INSTALL_CHART: usize = 1;
pub const INSTALL_VERSION: usize = 2;
pub const INSTALL_NAMESPACE: usize = 3;
pub const INSTALL_VALUES: usize = 4;

// Upgrade steps
pub const UPGRADE_CHART: usize = 0;
pub const UPGRADE_VERSION: usize = 1;
pub const UPGRADE_VALUES: usize = 2;

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
            chart: values[INSTALL_CHART].clone(),
            version: values[INSTALL_VERSION].clone(),
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
        chart: values[INSTALL_CHART].clone(),
        version: values[INSTALL_VERSION].clone(),
        namespace,
    }
    .into()
}

/// `y` edits the release's current values, `d` the chart defaults
fn upgrade_values_branch(ctx: &UpgradeContext, values: &[String], answer: &str) -> Option<Branch> {
    let source: Operation = if is_yes(answer) {
        HelmCommand::Get {
            kind: GetKind::Values,
            release: ctx.release.clone(),
            namespace: ctx.namespace.clone(),
        }
        .into()
    } else if answer == "d" {
        HelmCommand::ShowValues {
            chart: values[UPGRADE_CHART].clone(),
            version: values[UPGRADE_VERSION].clone(),
        }
        .into()
    } else if is_no(answer) {
        return Some(Branch::Continue);
    } else {
        return None;
    };
    Some(Branch::Edit(EditorRequest {
        source,
        path: ctx.workspace.values_file(&ctx.namespace, &ctx.release)?,
    }))
}

fn upgrade_operation(ctx: &UpgradeContext, values: &[String]) -> Operation {
    let answer = &values[UPGRADE_VALUES];
    let edited = is_yes(answer) || answer == "d";
    HelmCommand::Upgrade {
        release: ctx.release.clone(),
        chart: values[UPGRADE_CHART].clone(),
        version: values[UPGRADE_VERSION].clone(),
        namespace: ctx.namespace.clone(),
        values: edited
            .then(|| ctx.workspace.values_file(&ctx.namespace, &ctx.release))
            .flatten(),
    }
    .into()
}

fn target(t: Target) -> actions::Target {
    actions::Target::Releases(t)
}

pub struct ReleasesTab {
    workspace: Workspace,
    releases: TablePanel,
    history: TablePanel,
    notes: TextPanel,
    metadata: TextPanel,
    hooks: TextPanel,
    values: TextPanel,
    manifest: TextPanel,
    install: Wizard<InstallContext>,
    upgrade: Wizard<UpgradeContext>,
    view: ViewState<Detail, ReleaseWizard>,
    focus: FocusManager<Pane, Input>,
}

impl ReleasesTab {
    pub fn new(ctx: &TabContext) -> Self {
        let install = Wizard::new("Install release", install_operation, ctx.debounce)
            .step("Release name", StepKind::Text)
            .checked(check_release)
            .step("Chart", StepKind::Suggest)
            .step("Version (empty for latest)", StepKind::Suggest)
            .step("Namespace (empty for default)", StepKind::Text)
            .checked(check_namespace)
            .step("Edit values? y/n", StepKind::Branch(install_values_branch))
            .step("Press enter to install", StepKind::Confirm);

        let upgrade = Wizard::new("Upgrade release", upgrade_operation, ctx.debounce)
            .step("Chart", StepKind::Suggest)
            .step("Version (empty for latest)", StepKind::Suggest)
            .step("Edit values? y (current) / d (chart defaults) / n", StepKind::Branch(upgrade_values_branch))
            .step("Press enter to upgrade", StepKind::Confirm);

        let mut tab = Self {
            workspace: ctx.workspace.clone(),
            releases: TablePanel::new("Releases", RELEASE_COLUMNS),
            history: TablePanel::new("History", HISTORY_COLUMNS),
            notes: TextPanel::new("Notes"),
            metadata: TextPanel::new("Metadata"),
            hooks: TextPanel::new("Hooks"),
            values: TextPanel::new("Values"),
            manifest: TextPanel::new("Manifest"),
            install,
            upgrade,
            view: ViewState::new(),
            focus: FocusManager::new(Pane::Releases),
        };
        tab.sync_focus();
        tab
    }

    pub fn view(&self) -> View<Detail, ReleaseWizard> {
        self.view.current()
    }

    pub fn releases(&self) -> &TablePanel {
        &self.releases
    }

    pub fn releases_mut(&mut self) -> &mut TablePanel {
        &mut self.releases
    }

    pub fn history(&self) -> &TablePanel {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut TablePanel {
        &mut self.history
    }

    pub fn text_panel(&self, detail: Detail) -> Option<&TextPanel> {
        match detail {
            Detail::History => None,
            Detail::Notes => Some(&self.notes),
            Detail::Metadata => Some(&self.metadata),
            Detail::Hooks => Some(&self.hooks),
            Detail::Values => Some(&self.values),
            Detail::Manifest => Some(&self.manifest),
        }
    }

    fn text_panel_mut(&mut self, detail: Detail) -> Option<&mut TextPanel> {
        match detail {
            Detail::History => None,
            Detail::Notes => Some(&mut self.notes),
            Detail::Metadata => Some(&mut self.metadata),
            Detail::Hooks => Some(&mut self.hooks),
            Detail::Values => Some(&mut self.values),
            Detail::Manifest => Some(&mut self.manifest),
        }
    }

    pub fn focus(&self) -> &FocusManager<Pane, Input> {
        &self.focus
    }

    pub fn install_wizard(&self) -> &Wizard<InstallContext> {
        &self.install
    }

    pub fn upgrade_wizard(&self) -> &Wizard<UpgradeContext> {
        &self.upgrade
    }

    fn sync_focus(&mut self) {
        let detail = self.view.detail();
        let detail_focused = self.focus.is_panel_focused(Pane::Detail);
        self.releases.set_focused(self.focus.is_panel_focused(Pane::Releases));
        self.history.set_focused(detail_focused && detail == Some(Detail::History));
        for d in Detail::ALL.iter().copied() {
            if let Some(panel) = self.text_panel_mut(d) {
                panel.set_focused(detail_focused && detail == Some(d));
            }
        }
    }

    /// Selected release name and namespace.
    fn selected_release(&self) -> Result<(String, String), HelmError> {
        match (self.releases.selected_cell(NAME), self.releases.selected_cell(NAMESPACE)) {
            (Some(name), Some(namespace)) => Ok((name.to_string(), namespace.to_string())),
            _ => Err(HelmError::NoSelection(NO_SELECTION_RELEASE)),
        }
    }

    fn refresh_list(&mut self) -> Request {
        let tag = self.releases.begin_load();
        Request::new(target(Target::List), tag, HelmCommand::ListReleases)
    }

    /// One fetch per detail view for the selected release.
    fn fan_out(&mut self) -> Vec<Effect> {
        let selected: Option<Row> = self.releases.selected_row().cloned();
        RefreshCoordinator::fan_out(Detail::ALL, selected.as_ref(), |detail, row| {
            let tag = match self.text_panel_mut(detail) {
                Some(panel) => panel.begin_load(),
                None => self.history.begin_load(),
            };
            Request::new(
                target(Target::Detail(detail)),
                tag,
                detail.command(&row[NAME], &row[NAMESPACE]),
            )
        })
    }

    fn enter_detail(&mut self) -> Vec<Effect> {
        if self.releases.selected_row().is_none() {
            self.releases.set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_RELEASE)));
            return Vec::new();
        }
        self.view.select();
        self.releases.pin_selected();
        self.history.select(0);
        self.focus.focus_panel(Pane::Detail);
        self.sync_focus();
        self.fan_out()
    }

    fn leave_detail(&mut self) {
        self.view.back();
        self.releases.unpin();
        self.focus.return_to_primary();
        self.sync_focus();
    }

    fn uninstall(&mut self) -> Vec<Effect> {
        match self.selected_release() {
            Ok((release, namespace)) => {
                log::info!("Releases: uninstalling {} from {}", release, namespace);
                vec![Effect::Dispatch(Request::new(
                    target(Target::Uninstall),
                    0,
                    HelmCommand::Uninstall { release, namespace },
                ))]
            }
            Err(e) => {
                self.releases.set_notice(Notice::from(&e));
                Vec::new()
            }
        }
    }

    fn rollback(&mut self) -> Vec<Effect> {
        let revision = self.history.selected_cell(REVISION).map(str::to_string);
        match (self.selected_release(), revision) {
            (Ok((release, namespace)), Some(revision)) => {
                log::info!("Releases: rolling back {} to revision {}", release, revision);
                vec![Effect::Dispatch(Request::new(
                    target(Target::Rollback),
                    0,
                    HelmCommand::Rollback {
                        release,
                        namespace,
                        revision,
                    },
                ))]
            }
            (Err(e), _) => {
                self.releases.set_notice(Notice::from(&e));
                Vec::new()
            }
            (_, None) => {
                self.history.set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_REVISION)));
                Vec::new()
            }
        }
    }

    fn open_install(&mut self) {
        self.install.open(InstallContext {
            workspace: self.workspace.clone(),
        });
        self.open_wizard(ReleaseWizard::Install);
    }

    fn open_upgrade(&mut self) {
        match self.selected_release() {
            Ok((release, namespace)) => {
                self.upgrade.open(UpgradeContext {
                    workspace: self.workspace.clone(),
                    release,
                    namespace,
                });
                self.open_wizard(ReleaseWizard::Upgrade);
            }
            Err(e) => self.releases.set_notice(Notice::from(&e)),
        }
    }

    fn open_wizard(&mut self, wizard: ReleaseWizard) {
        self.releases.unpin();
        self.view.open_wizard(wizard);
        self.focus.focus_input(Input::Wizard);
        self.sync_focus();
    }

    fn close_wizard(&mut self) {
        self.view.back();
        self.focus.return_to_primary();
        self.sync_focus();
    }

    fn handle_wizard_key(&mut self, wizard: ReleaseWizard, key: KeyEvent) -> Vec<Effect> {
        let suggestion = |step| target(Target::Suggestion { wizard, step });
        let result = match wizard {
            ReleaseWizard::Install => drive_wizard(&mut self.install, key, suggestion),
            ReleaseWizard::Upgrade => drive_wizard(&mut self.upgrade, key, suggestion),
        };

        match result {
            WizardKey::Effects(effects) => effects,
            WizardKey::Cancelled => {
                log::info!("Releases: {:?} wizard cancelled", wizard);
                self.close_wizard();
                Vec::new()
            }
            WizardKey::Completed(operation) => {
                self.close_wizard();
                let completion = match &operation {
                    Operation::Helm(HelmCommand::Install { release, namespace, .. }) => Target::Install {
                        release: release.clone(),
                        namespace: namespace.clone(),
                    },
                    Operation::Helm(HelmCommand::Upgrade { release, namespace, .. }) => Target::Upgrade {
                        release: release.clone(),
                        namespace: namespace.clone(),
                    },
                    other => {
                        log::warn!("Releases: unexpected wizard operation {}", other.describe());
                        return Vec::new();
                    }
                };
                log::info!("Releases: {}", operation.describe());
                vec![Effect::Dispatch(Request::new(target(completion), 0, operation))]
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.enter_detail(),
            KeyCode::Char('r') => vec![Effect::Dispatch(self.refresh_list())],
            KeyCode::Char('d') => self.uninstall(),
            KeyCode::Char('u') => {
                self.open_upgrade();
                Vec::new()
            }
            KeyCode::Char('i') => {
                self.open_install();
                Vec::new()
            }
            _ => {
                self.releases.handle_key(key);
                Vec::new()
            }
        }
    }

    fn handle_detail_key(&mut self, detail: Detail, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.view.next();
                self.sync_focus();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.view.previous();
                self.sync_focus();
            }
            KeyCode::Esc | KeyCode::Backspace => self.leave_detail(),
            KeyCode::Char('R') if detail == Detail::History => return self.rollback(),
            KeyCode::Char('d') => return self.uninstall(),
            KeyCode::Char('u') => self.open_upgrade(),
            KeyCode::Char('r') => return vec![Effect::Dispatch(self.refresh_list())],
            _ => match self.text_panel_mut(detail) {
                Some(panel) => {
                    panel.handle_key(key);
                }
                None => {
                    self.history.handle_key(key);
                }
            },
        }
        Vec::new()
    }

    /// Deliver a suggestion trigger. Fetches only for the focused, current input.
    pub fn on_debounce(&mut self, t: Target, tag: u64) -> Vec<Effect> {
        let Target::Suggestion { wizard, step } = t else {
            return Vec::new();
        };
        if self.view.wizard() != Some(wizard) {
            return Vec::new();
        }

        let (values, input) = match wizard {
            ReleaseWizard::Install => (self.install.values(), self.install.input(step)),
            ReleaseWizard::Upgrade => (self.upgrade.values(), self.upgrade.input(step)),
        };
        let current = input
            .filter(|input| input.is_focused())
            .and_then(|input| input.debouncer())
            .is_some_and(|debouncer| debouncer.is_current(tag));
        if !current {
            return Vec::new();
        }

        let command = match (wizard, step) {
            (ReleaseWizard::Install, INSTALL_CHART) | (ReleaseWizard::Upgrade, UPGRADE_CHART) => {
                let query = values[step].clone();
                if query.is_empty() {
                    return Vec::new();
                }
                HelmCommand::SearchCharts { query }
            }
            (ReleaseWizard::Install, INSTALL_VERSION) => HelmCommand::SearchVersions {
                chart: values[INSTALL_CHART].clone(),
            },
            (ReleaseWizard::Upgrade, UPGRADE_VERSION) => HelmCommand::SearchVersions {
                chart: values[UPGRADE_CHART].clone(),
            },
            _ => return Vec::new(),
        };
        vec![Effect::Dispatch(Request::new(target(t), tag, command))]
    }

    /// Apply an outcome addressed to this tab.
    pub fn apply(&mut self, t: Target, tag: u64, result: Result<Payload, HelmError>) -> Vec<Effect> {
        match t {
            Target::List => {
                if self.releases.apply_load(tag, result) {
                    self.fan_out()
                } else {
                    Vec::new()
                }
            }
            Target::Detail(detail) => {
                match self.text_panel_mut(detail) {
                    Some(panel) => panel.apply_load(tag, result),
                    None => self.history.apply_load(tag, result),
                };
                Vec::new()
            }
            Target::Suggestion { wizard, step } => {
                let input = match wizard {
                    ReleaseWizard::Install => self.install.input_mut(step),
                    ReleaseWizard::Upgrade => self.upgrade.input_mut(step),
                };
                match (input, result) {
                    (Some(input), Ok(Payload::Suggestions(suggestions)))
                        if input.debouncer().is_some_and(|d| d.is_current(tag)) =>
                    {
                        input.set_suggestions(suggestions);
                    }
                    (_, Err(e)) => log::warn!("Releases: suggestion lookup failed: {}", e),
                    _ => log::debug!("Releases: dropping stale suggestions #{}", tag),
                }
                Vec::new()
            }
            Target::Uninstall => {
                if result.is_ok() {
                    if self.view.detail().is_some() {
                        self.leave_detail();
                    } else {
                        // A wizard opened meanwhile keeps the view and focus
                        self.releases.unpin();
                    }
                    self.releases.select(0);
                }
                self.after_mutation("Release uninstalled", result)
            }
            Target::Rollback => self.after_mutation("Release rolled back", result),
            Target::Install { release, namespace } => {
                let mut effects: Vec<Effect> = self
                    .workspace
                    .release_dir(&namespace, &release)
                    .map(Effect::RemoveDir)
                    .into_iter()
                    .collect();
                effects.extend(self.after_mutation("Release installed", result));
                effects
            }
            Target::Upgrade { release, namespace } => {
                let mut effects: Vec<Effect> = self
                    .workspace
                    .release_dir(&namespace, &release)
                    .map(Effect::RemoveDir)
                    .into_iter()
                    .collect();
                effects.extend(self.after_mutation("Release upgraded", result));
                effects
            }
        }
    }

    fn after_mutation(&mut self, done: &str, result: Result<Payload, HelmError>) -> Vec<Effect> {
        match &result {
            Ok(_) => self.releases.set_notice(Notice::info(done)),
            Err(e) => self.releases.set_notice(Notice::from(e)),
        }
        RefreshCoordinator::after_mutation(&result, || self.refresh_list())
    }

    fn render_detail(&mut self, f: &mut Frame, rect: Rect, detail: Detail) {
        let areas = LayoutManager::detail_layout(rect);
        self.releases.render(f, areas[0]);

        let titles: Vec<&str> = Detail::ALL.iter().map(|d| d.title()).collect();
        let index = Detail::ALL.iter().position(|d| *d == detail).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(index)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(Color::Cyan));
        f.render_widget(tabs, areas[1]);

        match self.text_panel_mut(detail) {
            Some(panel) => panel.render(f, areas[2]),
            None => self.history.render(f, areas[2]),
        }
    }
}

impl Component for ReleasesTab {
    fn init(&mut self) -> Vec<Effect> {
        vec![Effect::Dispatch(self.refresh_list())]
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.view.current() {
            View::Wizard(wizard) => self.handle_wizard_key(wizard, key),
            View::List => {
                self.releases.clear_notice();
                self.handle_list_key(key)
            }
            View::Detail(detail) => {
                self.releases.clear_notice();
                self.handle_detail_key(detail, key)
            }
        }
    }

    fn on_editor_finished(&mut self, result: Result<(), String>) -> Vec<Effect> {
        let advance = match self.view.wizard() {
            Some(ReleaseWizard::Install) => self.install.resume(result),
            Some(ReleaseWizard::Upgrade) => self.upgrade.resume(result),
            None => Advance::Inactive,
        };
        log::debug!("Releases: editor finished, {:?}", advance);
        Vec::new()
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.releases.set_viewport_height(height);
        let body = height.saturating_sub(5);
        self.history.set_viewport_height(body);
        for detail in Detail::ALL.iter().copied() {
            if let Some(panel) = self.text_panel_mut(detail) {
                panel.set_viewport_height(body);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.focus.focused_input().is_some()
    }

    fn help(&self) -> &'static str {
        match self.view.current() {
            View::List => HELP_RELEASES_LIST,
            View::Detail(_) => HELP_RELEASES_DETAIL,
            View::Wizard(_) => HELP_WIZARD,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match self.view.current() {
            View::List => self.releases.render(f, rect),
            View::Detail(detail) => self.render_detail(f, rect, detail),
            View::Wizard(wizard) => {
                self.releases.render(f, rect);
                let popup = LayoutManager::centered_rect(70, 80, rect);
                match wizard {
                    ReleaseWizard::Install => render_wizard(f, popup, &self.install),
                    ReleaseWizard::Upgrade => render_wizard(f, popup, &self.upgrade),
                }
            }
        }
    }
}
