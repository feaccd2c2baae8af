//! Installed helm plugins.

use crate::constants::{HELP_PLUGINS, NO_SELECTION_PLUGIN};
use crate::helm::{HelmCommand, HelmError, Payload};
use crate::ui::components::{InputEvent, Notice, TablePanel, TextInput};
use crate::ui::core::actions::{self, Effect, Request};
use crate::ui::core::{Component, FocusManager, RefreshCoordinator};
use crate::ui::layout::{ColumnSpec, LayoutManager};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

pub const PLUGIN_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::flex("Name", 1),
    ColumnSpec::flex("Version", 1),
    ColumnSpec::flex("Description", 3),
];

const NAME: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    List,
    Install,
    Update,
    Uninstall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Plugins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Install,
}

fn target(t: Target) -> actions::Target {
    actions::Target::Plugins(t)
}

pub struct PluginsTab {
    plugins: TablePanel,
    install: TextInput,
    focus: FocusManager<Pane, Input>,
}

impl Default for PluginsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginsTab {
    pub fn new() -> Self {
        let mut plugins = TablePanel::new("Plugins", PLUGIN_COLUMNS);
        plugins.set_focused(true);
        Self {
            plugins,
            install: TextInput::new("Plugin path or URL"),
            focus: FocusManager::new(Pane::Plugins),
        }
    }

    pub fn plugins(&self) -> &TablePanel {
        &self.plugins
    }

    pub fn install_input(&self) -> &TextInput {
        &self.install
    }

    pub fn focus(&self) -> &FocusManager<Pane, Input> {
        &self.focus
    }

    fn refresh(&mut self) -> Request {
        let tag = self.plugins.begin_load();
        Request::new(target(Target::List), tag, HelmCommand::PluginList)
    }

    fn open_install(&mut self) {
        self.install.clear();
        self.install.on_focus();
        self.plugins.set_focused(false);
        self.focus.focus_input(Input::Install);
    }

    fn close_install(&mut self) {
        self.install.clear();
        self.install.on_blur();
        self.focus.return_to_primary();
        self.plugins.set_focused(true);
    }

    fn selected(&mut self) -> Option<String> {
        let name = self.plugins.selected_cell(NAME).map(str::to_string);
        if name.is_none() {
            self.plugins
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_PLUGIN)));
        }
        name
    }

    fn handle_install_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.install.handle_key(key) {
            InputEvent::Submitted => {
                let source = self.install.value().trim().to_string();
                self.close_install();
                if source.is_empty() {
                    return Vec::new();
                }
                log::info!("Plugins: installing {}", source);
                vec![Effect::Dispatch(Request::new(
                    target(Target::Install),
                    0,
                    HelmCommand::PluginInstall { source },
                ))]
            }
            InputEvent::Cancelled => {
                self.close_install();
                Vec::new()
            }
            InputEvent::Edited | InputEvent::Moved | InputEvent::Ignored => Vec::new(),
        }
    }

    pub fn apply(&mut self, t: Target, tag: u64, result: Result<Payload, HelmError>) -> Vec<Effect> {
        let done = match t {
            Target::List => {
                self.plugins.apply_load(tag, result);
                return Vec::new();
            }
            Target::Install => "Plugin installed",
            Target::Update => "Plugin updated",
            Target::Uninstall => "Plugin uninstalled",
        };
        match &result {
            Ok(_) => self.plugins.set_notice(Notice::info(done)),
            Err(e) => self.plugins.set_notice(Notice::from(e)),
        }
        RefreshCoordinator::after_mutation(&result, || self.refresh())
    }
}

impl Component for PluginsTab {
    fn init(&mut self) -> Vec<Effect> {
        vec![Effect::Dispatch(self.refresh())]
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.focus.is_input_focused(Input::Install) {
            return self.handle_install_key(key);
        }
        self.plugins.clear_notice();

        match key.code {
            KeyCode::Char('i') => {
                self.open_install();
                Vec::new()
            }
            KeyCode::Char('u') => match self.selected() {
                Some(name) => vec![Effect::Dispatch(Request::new(
                    target(Target::Update),
                    0,
                    HelmCommand::PluginUpdate { name },
                ))],
                None => Vec::new(),
            },
            KeyCode::Char('U') => match self.selected() {
                Some(name) => {
                    log::info!("Plugins: uninstalling {}", name);
                    vec![Effect::Dispatch(Request::new(
                        target(Target::Uninstall),
                        0,
                        HelmCommand::PluginUninstall { name },
                    ))]
                }
                None => Vec::new(),
            },
            KeyCode::Char('r') => vec![Effect::Dispatch(self.refresh())],
            _ => {
                self.plugins.handle_key(key);
                Vec::new()
            }
        }
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.plugins.set_viewport_height(height.saturating_sub(3));
    }

    fn captures_input(&self) -> bool {
        self.focus.focused_input().is_some()
    }

    fn help(&self) -> &'static str {
        HELP_PLUGINS
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::input_layout(rect);
        self.install.render(f, areas[0]);
        self.plugins.render(f, areas[1]);
    }
}
