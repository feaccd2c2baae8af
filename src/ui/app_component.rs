use crate::catalog::CatalogClient;
use crate::constants::{CHROME_HEIGHT, EDITOR_SUSPENDED};
use crate::helm::{CommandRunner, HelmError, Payload};
use crate::logger::Logger;
use crate::ui::components::logs_dialog::render_logs_dialog;
use crate::ui::core::{
    actions::{Action, Effect, Outcome, Request, TabId, Target},
    task_manager::TaskManager,
    Component, TabContext,
};
use crate::ui::layout::LayoutManager;
use crate::ui::tabs::{HubTab, PluginsTab, ReleasesTab, RepositoriesTab};
use crate::workspace::Workspace;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{ScrollbarState, Tabs},
    Frame,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where an editor hand-off stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStage {
    /// Fetching the content to edit
    Preparing(PathBuf),
    /// The file is written; the terminal belongs to the editor
    Editing(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Interactive,
    /// Keys are ignored until the editor hand-off finishes
    Suspended { owner: TabId, stage: EditorStage },
}

pub struct AppComponent {
    releases: ReleasesTab,
    repositories: RepositoriesTab,
    hub: HubTab,
    plugins: PluginsTab,
    active: TabId,
    mode: AppMode,
    /// Editor launch waiting for the run loop
    pending_editor: Option<PathBuf>,

    task_manager: TaskManager,
    logger: Logger,

    show_logs: bool,
    logs_scroll: usize,
    logs_scrollbar: ScrollbarState,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(
        ctx: &TabContext,
        runner: Arc<dyn CommandRunner>,
        catalog: Arc<dyn CatalogClient>,
        logger: Logger,
    ) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (task_manager, receiver) = TaskManager::new(runner, catalog);
        log::debug!("App: working directory {}", ctx.workspace.root().display());

        let app = Self {
            releases: ReleasesTab::new(ctx),
            repositories: RepositoriesTab::new(ctx),
            hub: HubTab::new(),
            plugins: PluginsTab::new(),
            active: TabId::default(),
            mode: AppMode::default(),
            pending_editor: None,
            task_manager,
            logger,
            show_logs: false,
            logs_scroll: 0,
            logs_scrollbar: ScrollbarState::default(),
            should_quit: false,
        };
        (app, receiver)
    }

    /// Issue every tab's initial loads.
    pub fn init(&mut self) {
        let mut effects = self.releases.init();
        effects.extend(self.repositories.init());
        effects.extend(self.hub.init());
        effects.extend(self.plugins.init());
        self.execute(effects);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_tab(&self) -> TabId {
        self.active
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn releases(&self) -> &ReleasesTab {
        &self.releases
    }

    pub fn repositories(&self) -> &RepositoriesTab {
        &self.repositories
    }

    pub fn hub(&self) -> &HubTab {
        &self.hub
    }

    pub fn plugins(&self) -> &PluginsTab {
        &self.plugins
    }

    pub fn showing_logs(&self) -> bool {
        self.show_logs
    }

    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Editor launch requested since the last call.
    pub fn take_pending_editor(&mut self) -> Option<PathBuf> {
        self.pending_editor.take()
    }

    fn tab_mut(&mut self, tab: TabId) -> &mut dyn Component {
        match tab {
            TabId::Releases => &mut self.releases,
            TabId::Repositories => &mut self.repositories,
            TabId::Hub => &mut self.hub,
            TabId::Plugins => &mut self.plugins,
        }
    }

    fn tab(&self, tab: TabId) -> &dyn Component {
        match tab {
            TabId::Releases => &self.releases,
            TabId::Repositories => &self.repositories,
            TabId::Hub => &self.hub,
            TabId::Plugins => &self.plugins,
        }
    }

    /// Handle one loop message.
    pub fn handle_action(&mut self, action: Action) {
        let effects = match action {
            Action::Key(key) => self.handle_key(key),
            Action::Resize(width, height) => {
                self.resize(width, height);
                Vec::new()
            }
            Action::Completed(outcome) => self.route_outcome(outcome),
            Action::DebounceElapsed { target, tag } => self.route_debounce(target, tag),
            Action::EditorFinished(result) => self.editor_finished(result),
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::None => Vec::new(),
        };
        self.execute(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            log::info!("Global key: Ctrl+C - quitting application");
            self.should_quit = true;
            return Vec::new();
        }

        if let AppMode::Suspended { .. } = self.mode {
            log::debug!("App: ignoring key while suspended");
            return Vec::new();
        }

        if self.show_logs {
            match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => self.show_logs = false,
                KeyCode::Down | KeyCode::Char('j') => self.logs_scroll = self.logs_scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => self.logs_scroll = self.logs_scroll.saturating_sub(1),
                KeyCode::Home => self.logs_scroll = 0,
                _ => {}
            }
            return Vec::new();
        }

        if !self.tab(self.active).captures_input() {
            match key.code {
                KeyCode::Char(']') => {
                    self.active = self.active.next();
                    return Vec::new();
                }
                KeyCode::Char('[') => {
                    self.active = self.active.previous();
                    return Vec::new();
                }
                KeyCode::Char('G') => {
                    log::debug!("Global key: 'G' - opening logs dialog");
                    self.show_logs = true;
                    self.logs_scroll = 0;
                    return Vec::new();
                }
                _ => {}
            }
        }

        let active = self.active;
        self.tab_mut(active).handle_key_events(key)
    }

    fn resize(&mut self, width: u16, height: u16) {
        let body = height.saturating_sub(CHROME_HEIGHT);
        for tab in TabId::ALL {
            self.tab_mut(tab).resize(width, body);
        }
    }

    fn route_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        let Outcome { target, tag, result } = outcome;
        if let Err(e) = &result {
            log::warn!("Outcome {:?} #{} failed: {}", target, tag, e);
        }
        match target {
            Target::Releases(t) => self.releases.apply(t, tag, result),
            Target::Repositories(t) => self.repositories.apply(t, tag, result),
            Target::Hub(t) => self.hub.apply(t, tag, result),
            Target::Plugins(t) => self.plugins.apply(t, tag, result),
            Target::EditorSource => self.editor_source_ready(result),
        }
    }

    fn route_debounce(&mut self, target: Target, tag: u64) -> Vec<Effect> {
        match target {
            Target::Releases(t) => self.releases.on_debounce(t, tag),
            other => {
                log::debug!("App: no suggestions for {:?}", other);
                Vec::new()
            }
        }
    }

    /// Content for the editor arrived: write it and hand over the terminal.
    fn editor_source_ready(&mut self, result: Result<Payload, HelmError>) -> Vec<Effect> {
        let AppMode::Suspended {
            owner,
            stage: EditorStage::Preparing(path),
        } = &self.mode
        else {
            log::debug!("App: editor content arrived outside a hand-off");
            return Vec::new();
        };
        let (owner, path) = (*owner, path.clone());

        let written = match result {
            Ok(Payload::Text(content)) => Workspace::write_values(&path, &content).map_err(|e| format!("{:#}", e)),
            Ok(other) => Err(format!("unexpected editor content: {:?}", other)),
            Err(e) => Err(e.to_string()),
        };

        match written {
            Ok(()) => {
                log::info!("App: editing {}", path.display());
                self.mode = AppMode::Suspended {
                    owner,
                    stage: EditorStage::Editing(path.clone()),
                };
                self.pending_editor = Some(path);
                Vec::new()
            }
            Err(reason) => {
                log::warn!("App: could not prepare {}: {}", path.display(), reason);
                self.mode = AppMode::Interactive;
                self.tab_mut(owner).on_editor_finished(Err(reason))
            }
        }
    }

    fn editor_finished(&mut self, result: Result<(), String>) -> Vec<Effect> {
        let AppMode::Suspended { owner, .. } = self.mode else {
            log::debug!("App: editor finished outside a hand-off");
            return Vec::new();
        };
        self.mode = AppMode::Interactive;
        self.tab_mut(owner).on_editor_finished(result)
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch(request) => {
                    self.task_manager.dispatch(request);
                }
                Effect::Schedule { target, tag, delay } => {
                    self.task_manager.schedule(target, tag, delay);
                }
                Effect::Edit(request) => {
                    if self.mode != AppMode::Interactive {
                        log::warn!("App: editor already in use, dropping {}", request.path.display());
                        continue;
                    }
                    self.mode = AppMode::Suspended {
                        owner: self.active,
                        stage: EditorStage::Preparing(request.path),
                    };
                    self.task_manager
                        .dispatch(Request::new(Target::EditorSource, 0, request.source));
                }
                Effect::RemoveDir(path) => {
                    self.task_manager.remove_dir(path);
                }
            }
        }
    }

    fn render_tab_bar(&self, f: &mut Frame, rect: Rect) {
        let titles: Vec<&str> = TabId::ALL.iter().map(|t| t.title()).collect();
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(Color::Cyan));
        f.render_widget(tabs, rect);
    }

    pub fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::main_layout(rect);
        self.render_tab_bar(f, areas[0]);

        let active = self.active;
        self.tab_mut(active).render(f, areas[1]);

        let help = match self.mode {
            AppMode::Suspended { .. } => EDITOR_SUSPENDED,
            AppMode::Interactive => self.tab(active).help(),
        };
        f.render_widget(Line::styled(help, Style::default().fg(Color::DarkGray)), areas[2]);

        if self.show_logs {
            render_logs_dialog(f, rect, &self.logger, self.logs_scroll, &mut self.logs_scrollbar);
        }
    }
}
