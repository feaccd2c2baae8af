mod common;

use common::{char_key, context, key, EmptyCatalog, ScriptedRunner};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helmtui::logger::Logger;
use helmtui::ui::core::actions::{Action, TabId};
use helmtui::ui::core::View;
use helmtui::ui::tabs::releases::{Detail, ReleaseWizard, INSTALL_VALUES};
use helmtui::ui::{AppComponent, AppMode, EditorStage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const LIST_RELEASES: &str = "ls --all-namespaces --output json";
const WEB_RELEASE: &str = r#"[{"name":"web","namespace":"default","revision":"1","updated":"2024-01-01 10:00:00 +0000 UTC","status":"deployed","chart":"nginx-15.0.0","app_version":"1.25"}]"#;

/// Feed every background message back into the app until things go quiet.
async fn settle(app: &mut AppComponent, rx: &mut UnboundedReceiver<Action>) {
    while let Ok(Some(action)) = timeout(Duration::from_millis(200), rx.recv()).await {
        app.handle_action(action);
    }
}

fn press(app: &mut AppComponent, key: KeyEvent) {
    app.handle_action(Action::Key(key));
}

fn type_text(app: &mut AppComponent, text: &str) {
    for c in text.chars() {
        press(app, char_key(c));
    }
}

async fn started_app(runner: Arc<ScriptedRunner>) -> (tempfile::TempDir, AppComponent, UnboundedReceiver<Action>) {
    let (dir, ctx) = context();
    let (mut app, mut rx) = AppComponent::new(&ctx, runner, Arc::new(EmptyCatalog), Logger::new());
    app.handle_action(Action::Resize(120, 40));
    app.init();
    settle(&mut app, &mut rx).await;
    (dir, app, rx)
}

#[tokio::test]
async fn test_startup_loads_every_tab() {
    let runner = ScriptedRunner::new();
    runner.respond(LIST_RELEASES, WEB_RELEASE);
    let (_dir, app, _rx) = started_app(runner.clone()).await;

    assert_eq!(runner.calls_matching(LIST_RELEASES), 1);
    assert_eq!(runner.calls_matching("repo ls --output json"), 1);
    assert_eq!(runner.calls_matching("plugin ls"), 1);
    assert_eq!(app.releases().releases().len(), 1);
    assert!(!app.releases().releases().is_loading());
    assert_eq!(app.active_tab(), TabId::Releases);
    assert_eq!(app.mode(), &AppMode::Interactive);
}

#[tokio::test]
async fn test_delete_release_end_to_end() {
    let runner = ScriptedRunner::new();
    runner.respond(LIST_RELEASES, WEB_RELEASE);
    runner.respond("uninstall web --namespace default", "release \"web\" uninstalled\n");
    let (_dir, mut app, mut rx) = started_app(runner.clone()).await;

    press(&mut app, key(KeyCode::Enter));
    settle(&mut app, &mut rx).await;
    assert_eq!(app.releases().view(), View::Detail(Detail::History));
    assert_eq!(runner.calls_matching("get notes web --namespace default"), 2);

    // The release is gone once it is uninstalled
    runner.respond(LIST_RELEASES, "[]");
    press(&mut app, char_key('d'));
    settle(&mut app, &mut rx).await;

    assert_eq!(runner.calls_matching("uninstall web --namespace default"), 1);
    assert_eq!(runner.calls_matching(LIST_RELEASES), 2);
    assert_eq!(app.releases().view(), View::List);
    assert!(app.releases().releases().is_empty());
    assert_eq!(app.releases().releases().notice().unwrap().text, "Release uninstalled");
}

#[tokio::test]
async fn test_install_hands_values_to_the_editor() {
    let runner = ScriptedRunner::new();
    runner.respond("show values bitnami/nginx", "replicaCount: 1\n");
    let (dir, mut app, mut rx) = started_app(runner.clone()).await;

    press(&mut app, char_key('i'));
    for answer in ["web", "bitnami/nginx", "", ""] {
        type_text(&mut app, answer);
        press(&mut app, key(KeyCode::Enter));
    }
    type_text(&mut app, "y");
    press(&mut app, key(KeyCode::Enter));

    let values_file = dir.path().join(".helm-tui").join("default").join("web").join("values.yaml");
    assert_eq!(
        app.mode(),
        &AppMode::Suspended {
            owner: TabId::Releases,
            stage: EditorStage::Preparing(values_file.clone()),
        }
    );

    // Keys are ignored while the hand-off is in progress
    press(&mut app, key(KeyCode::Esc));
    assert_eq!(app.releases().view(), View::Wizard(ReleaseWizard::Install));

    settle(&mut app, &mut rx).await;
    assert_eq!(app.take_pending_editor(), Some(values_file.clone()));
    assert_eq!(app.take_pending_editor(), None);
    assert_eq!(std::fs::read_to_string(&values_file).unwrap(), "replicaCount: 1\n");
    assert!(matches!(
        app.mode(),
        AppMode::Suspended {
            stage: EditorStage::Editing(_),
            ..
        }
    ));

    app.handle_action(Action::EditorFinished(Ok(())));
    assert_eq!(app.mode(), &AppMode::Interactive);
    assert_eq!(app.releases().install_wizard().current(), INSTALL_VALUES + 1);

    runner.respond(
        &format!(
            "install web bitnami/nginx --values {} --namespace default --create-namespace",
            values_file.display()
        ),
        "NAME: web\n",
    );
    press(&mut app, key(KeyCode::Enter));
    settle(&mut app, &mut rx).await;

    assert_eq!(app.releases().releases().notice().unwrap().text, "Release installed");
    assert!(!values_file.parent().unwrap().exists());
}

#[tokio::test]
async fn test_failed_values_fetch_returns_to_the_wizard() {
    let runner = ScriptedRunner::new();
    runner.fail("show values missing/chart", 1, "Error: chart not found");
    let (_dir, mut app, mut rx) = started_app(runner).await;

    press(&mut app, char_key('i'));
    for answer in ["web", "missing/chart", "", "", "y"] {
        type_text(&mut app, answer);
        press(&mut app, key(KeyCode::Enter));
    }
    settle(&mut app, &mut rx).await;

    assert_eq!(app.mode(), &AppMode::Interactive);
    assert_eq!(app.take_pending_editor(), None);
    let wizard = app.releases().install_wizard();
    assert_eq!(wizard.current(), INSTALL_VALUES);
    assert!(wizard.error().unwrap().contains("chart not found"));
}

#[tokio::test]
async fn test_global_keys() {
    let (_dir, mut app, _rx) = started_app(ScriptedRunner::new()).await;

    press(&mut app, char_key(']'));
    assert_eq!(app.active_tab(), TabId::Repositories);
    press(&mut app, char_key('['));
    press(&mut app, char_key('['));
    assert_eq!(app.active_tab(), TabId::Plugins);

    press(&mut app, char_key('G'));
    assert!(app.showing_logs());
    // Tab switching is off behind the overlay
    press(&mut app, char_key(']'));
    assert_eq!(app.active_tab(), TabId::Plugins);
    press(&mut app, key(KeyCode::Esc));
    assert!(!app.showing_logs());

    // An open input keeps the keys for itself
    press(&mut app, char_key('i'));
    press(&mut app, char_key(']'));
    assert_eq!(app.active_tab(), TabId::Plugins);
    assert_eq!(app.plugins().install_input().value(), "]");

    press(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}
