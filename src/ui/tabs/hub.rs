//! Artifact Hub search, package default values and adding a package's repository.

use crate::catalog::CatalogQuery;
use crate::constants::{HELP_HUB, NO_SELECTION_PACKAGE};
use crate::helm::{HelmCommand, HelmError, Payload};
use crate::ui::components::{InputEvent, Notice, TablePanel, TextInput, TextPanel};
use crate::ui::core::actions::{self, Effect, Request};
use crate::ui::core::{Component, FocusManager, SubView, View, ViewState};
use crate::ui::layout::{ColumnSpec, LayoutManager};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, widgets::Clear, Frame};

pub const PACKAGE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::hidden("id"),
    ColumnSpec::hidden("version"),
    ColumnSpec::flex("Package", 1),
    ColumnSpec::flex("Repository", 1),
    ColumnSpec::flex("URL", 3),
    ColumnSpec::flex("Description", 3),
];

const PACKAGE_ID: usize = 0;
const PACKAGE_VERSION: usize = 1;
const REPOSITORY_NAME: usize = 3;
const REPOSITORY_URL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Search,
    Values,
    AddRepository,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Values,
}

impl SubView for Detail {
    const ALL: &'static [Self] = &[Detail::Values];

    fn title(self) -> &'static str {
        "Default values"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Results,
    Values,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Search,
    AddRepository,
}

fn target(t: Target) -> actions::Target {
    actions::Target::Hub(t)
}

pub struct HubTab {
    search: TextInput,
    repository_name: TextInput,
    results: TablePanel,
    values: TextPanel,
    view: ViewState<Detail, Input>,
    focus: FocusManager<Pane, Input>,
}

impl Default for HubTab {
    fn default() -> Self {
        Self::new()
    }
}

impl HubTab {
    pub fn new() -> Self {
        let mut tab = Self {
            search: TextInput::new("Search Artifact Hub"),
            repository_name: TextInput::new("Repository name"),
            results: TablePanel::new("Packages", PACKAGE_COLUMNS),
            values: TextPanel::new("Default values"),
            view: ViewState::new(),
            focus: FocusManager::new(Pane::Results),
        };
        tab.sync_focus();
        tab
    }

    pub fn view(&self) -> View<Detail, Input> {
        self.view.current()
    }

    pub fn focus(&self) -> &FocusManager<Pane, Input> {
        &self.focus
    }

    pub fn results(&self) -> &TablePanel {
        &self.results
    }

    pub fn values(&self) -> &TextPanel {
        &self.values
    }

    pub fn search_input(&self) -> &TextInput {
        &self.search
    }

    fn sync_focus(&mut self) {
        self.results.set_focused(self.focus.is_panel_focused(Pane::Results));
        self.values.set_focused(self.focus.is_panel_focused(Pane::Values));
        if self.focus.is_input_focused(Input::Search) {
            self.search.on_focus();
        } else {
            self.search.on_blur();
        }
        if self.focus.is_input_focused(Input::AddRepository) {
            self.repository_name.on_focus();
        } else {
            self.repository_name.on_blur();
        }
    }

    fn focus_input(&mut self, input: Input) {
        self.focus.focus_input(input);
        self.sync_focus();
    }

    fn focus_results(&mut self) {
        self.focus.return_to_primary();
        self.sync_focus();
    }

    fn run_search(&mut self) -> Vec<Effect> {
        let query = self.search.value().trim().to_string();
        self.focus_results();
        if query.is_empty() {
            return Vec::new();
        }
        log::info!("Hub: searching '{}'", query);
        let tag = self.results.begin_load();
        vec![Effect::Dispatch(Request::new(
            target(Target::Search),
            tag,
            CatalogQuery::Search { query },
        ))]
    }

    fn show_values(&mut self) -> Vec<Effect> {
        let package_id = self.results.selected_cell(PACKAGE_ID).map(str::to_string);
        let version = self.results.selected_cell(PACKAGE_VERSION).map(str::to_string);
        let (Some(package_id), Some(version)) = (package_id, version) else {
            self.results
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_PACKAGE)));
            return Vec::new();
        };
        self.view.select();
        self.focus.focus_panel(Pane::Values);
        self.sync_focus();
        let tag = self.values.begin_load();
        vec![Effect::Dispatch(Request::new(
            target(Target::Values),
            tag,
            CatalogQuery::DefaultValues { package_id, version },
        ))]
    }

    fn open_add_repository(&mut self) {
        if self.results.selected_row().is_none() {
            self.results
                .set_notice(Notice::from(&HelmError::NoSelection(NO_SELECTION_PACKAGE)));
            return;
        }
        self.repository_name.clear();
        if let Some(name) = self.results.selected_cell(REPOSITORY_NAME) {
            let name = name.to_string();
            self.repository_name.set_value(&name);
        }
        self.view.open_wizard(Input::AddRepository);
        self.focus_input(Input::AddRepository);
    }

    fn add_repository(&mut self) -> Vec<Effect> {
        let name = self.repository_name.value().trim().to_string();
        let url = self.results.selected_cell(REPOSITORY_URL).map(str::to_string);
        self.close_prompt();
        match url {
            Some(url) if !name.is_empty() => {
                log::info!("Hub: adding repository {} ({})", name, url);
                vec![Effect::Dispatch(Request::new(
                    target(Target::AddRepository),
                    0,
                    HelmCommand::RepoAdd { name, url },
                ))]
            }
            _ => Vec::new(),
        }
    }

    fn close_prompt(&mut self) {
        self.repository_name.clear();
        self.view.back();
        self.focus_results();
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.search.handle_key(key) {
            InputEvent::Submitted => self.run_search(),
            InputEvent::Cancelled => {
                self.focus_results();
                Vec::new()
            }
            InputEvent::Edited | InputEvent::Moved | InputEvent::Ignored => Vec::new(),
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('/') => {
                self.focus_input(Input::Search);
                Vec::new()
            }
            KeyCode::Enter => self.show_values(),
            KeyCode::Char('a') => {
                self.open_add_repository();
                Vec::new()
            }
            _ => {
                self.results.handle_key(key);
                Vec::new()
            }
        }
    }

    fn handle_values_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.view.back();
                self.focus_results();
            }
            KeyCode::Char('a') => self.open_add_repository(),
            _ => {
                self.values.handle_key(key);
            }
        }
        Vec::new()
    }

    pub fn apply(&mut self, t: Target, tag: u64, result: Result<Payload, HelmError>) -> Vec<Effect> {
        match t {
            Target::Search => {
                self.results.apply_load(tag, result);
            }
            Target::Values => {
                self.values.apply_load(tag, result);
            }
            Target::AddRepository => match &result {
                Ok(_) => self.results.set_notice(Notice::info("Repository added")),
                Err(e) => self.results.set_notice(Notice::from(e)),
            },
        }
        Vec::new()
    }
}

impl Component for HubTab {
    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.focus.focused_input() {
            Some(Input::Search) => return self.handle_search_key(key),
            Some(Input::AddRepository) => {
                return match self.repository_name.handle_key(key) {
                    InputEvent::Submitted => self.add_repository(),
                    InputEvent::Cancelled => {
                        self.close_prompt();
                        Vec::new()
                    }
                    _ => Vec::new(),
                };
            }
            None => {}
        }

        self.results.clear_notice();
        match self.view.current() {
            View::Detail(Detail::Values) => self.handle_values_key(key),
            View::List | View::Wizard(_) => self.handle_results_key(key),
        }
    }

    fn resize(&mut self, _width: u16, height: u16) {
        let body = height.saturating_sub(3);
        self.results.set_viewport_height(body);
        self.values.set_viewport_height(body);
    }

    fn captures_input(&self) -> bool {
        self.focus.focused_input().is_some()
    }

    fn help(&self) -> &'static str {
        HELP_HUB
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::input_layout(rect);
        self.search.render(f, areas[0]);
        match self.view.current() {
            View::Detail(Detail::Values) => self.values.render(f, areas[1]),
            View::List => self.results.render(f, areas[1]),
            View::Wizard(_) => {
                self.results.render(f, areas[1]);
                let popup = LayoutManager::centered_rect_lines(50, self.repository_name.height(), rect);
                f.render_widget(Clear, popup);
                self.repository_name.render(f, popup);
            }
        }
    }
}
