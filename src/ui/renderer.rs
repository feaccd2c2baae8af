//! Terminal ownership and the main event loop.

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::Path;
use std::sync::Arc;

use super::app_component::AppComponent;
use super::core::{actions::Action, EventHandler, EventType, TabContext};
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::helm::CommandRunner;
use crate::logger::Logger;

/// Run the TUI until the user quits.
pub async fn run_app(
    config: &Config,
    ctx: TabContext,
    runner: Arc<dyn CommandRunner>,
    catalog: Arc<dyn CatalogClient>,
    logger: Logger,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut app, receiver) = AppComponent::new(&ctx, runner, catalog, logger);
    let mut event_handler = EventHandler::new(config.ui.tick_rate(), receiver);
    let editor = config.editor.command();

    let size = terminal.size()?;
    app.handle_action(Action::Resize(size.width, size.height));
    app.init();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler, &editor).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
    editor: &str,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Key(key) => {
                app.handle_action(Action::Key(key));
                needs_render = true;
            }
            EventType::Resize(width, height) => {
                app.handle_action(Action::Resize(width, height));
                needs_render = true;
            }
            EventType::Background(action) => {
                app.handle_action(action);
                needs_render = true;
            }
            EventType::Tick | EventType::Other => {}
        }

        if let Some(path) = app.take_pending_editor() {
            let result = suspend_for_editor(terminal, editor, &path).await;
            app.handle_action(Action::EditorFinished(result));
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Hand the terminal to `editor` on `path` and take it back afterwards.
async fn suspend_for_editor<B: Backend>(terminal: &mut Terminal<B>, editor: &str, path: &Path) -> Result<(), String> {
    let restore = |terminal: &mut Terminal<B>| -> Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        terminal.clear()?;
        Ok(())
    };

    if let Err(e) = disable_raw_mode().and_then(|()| execute!(io::stdout(), LeaveAlternateScreen)) {
        return Err(format!("Failed to release the terminal: {}", e));
    }

    let result = run_editor(editor, path).await;

    if let Err(e) = restore(terminal) {
        log::error!("Editor: failed to restore the terminal: {:#}", e);
    }
    result
}

async fn run_editor(editor: &str, path: &Path) -> Result<(), String> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        return Err("No editor configured".to_string());
    };
    log::info!("Editor: {} {}", editor, path.display());

    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await
        .map_err(|e| format!("Failed to start {}: {}", program, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("{} exited with {}", program, status))
    }
}
