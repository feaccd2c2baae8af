mod common;

use common::{char_key, context, dispatched, key, EmptyCatalog, ScriptedRunner};
use crossterm::event::KeyCode;
use helmtui::helm::{HelmCommand, Payload};
use helmtui::ui::core::actions::{self, Action, Effect, Operation, Outcome};
use helmtui::ui::core::{Component, TaskManager};
use helmtui::ui::tabs::releases::{ReleaseWizard, Target, INSTALL_CHART};
use helmtui::ui::tabs::ReleasesTab;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const CHART_SEARCH: &str = "search repo ngi --output json";

fn chart_suggestion() -> Target {
    Target::Suggestion {
        wizard: ReleaseWizard::Install,
        step: INSTALL_CHART,
    }
}

/// Install wizard open on the chart step.
fn on_chart_step(tab: &mut ReleasesTab) {
    tab.handle_key_events(char_key('i'));
    tab.handle_key_events(char_key('w'));
    tab.handle_key_events(key(KeyCode::Enter));
    assert_eq!(tab.install_wizard().current(), INSTALL_CHART);
}

fn schedule_all(task_manager: &mut TaskManager, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Schedule { target, tag, delay } => {
                task_manager.schedule(target, tag, delay);
            }
            Effect::Dispatch(request) => {
                task_manager.dispatch(request);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }
}

fn schedule_tag(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::Schedule { tag, .. }] => *tag,
        other => panic!("expected one schedule, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_issues_one_lookup() {
    let (_dir, ctx) = context();
    let runner = ScriptedRunner::new();
    runner.respond(
        CHART_SEARCH,
        r#"[{"name":"bitnami/nginx","version":"15.0.0","app_version":"1.25","description":"NGINX"}]"#,
    );
    let (mut task_manager, mut rx) = TaskManager::new(runner.clone(), Arc::new(EmptyCatalog));
    let mut tab = ReleasesTab::new(&ctx);
    on_chart_step(&mut tab);

    let start = Instant::now();
    let effects = tab.handle_key_events(char_key('n'));
    schedule_all(&mut task_manager, effects);
    sleep(Duration::from_millis(100)).await;
    let effects = tab.handle_key_events(char_key('g'));
    schedule_all(&mut task_manager, effects);
    sleep(Duration::from_millis(50)).await;
    let effects = tab.handle_key_events(char_key('i'));
    schedule_all(&mut task_manager, effects);

    // By 640 ms the triggers from 0 and 100 ms have fired, both stale
    sleep(Duration::from_millis(490)).await;
    let mut stale = 0;
    while let Ok(action) = rx.try_recv() {
        let Action::DebounceElapsed {
            target: actions::Target::Releases(target),
            tag,
        } = action
        else {
            panic!("unexpected action");
        };
        assert!(tab.on_debounce(target, tag).is_empty());
        stale += 1;
    }
    assert_eq!(stale, 2);
    assert!(runner.calls().is_empty());

    let Some(Action::DebounceElapsed {
        target: actions::Target::Releases(target),
        tag,
    }) = rx.recv().await
    else {
        panic!("expected the last trigger");
    };
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(650), "fired after {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(660), "fired after {:?}", elapsed);

    let effects = tab.on_debounce(target, tag);
    let requests = dispatched(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].operation,
        Operation::Helm(HelmCommand::SearchCharts {
            query: "ngi".to_string()
        })
    );
    schedule_all(&mut task_manager, effects);

    let Some(Action::Completed(Outcome {
        target: actions::Target::Releases(target),
        tag,
        result,
    })) = rx.recv().await
    else {
        panic!("expected the lookup outcome");
    };
    tab.apply(target, tag, result);

    assert_eq!(runner.calls_matching(CHART_SEARCH), 1);
    assert_eq!(runner.calls().len(), 1);
    let input = tab.install_wizard().input(INSTALL_CHART).unwrap();
    assert_eq!(input.suggestions(), ["bitnami/nginx".to_string()]);
}

#[test]
fn test_suggestions_for_an_older_value_are_discarded() {
    let (_dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);
    on_chart_step(&mut tab);

    tab.handle_key_events(char_key('n'));
    let tag = schedule_tag(&tab.handle_key_events(char_key('g')));
    let lookup = dispatched(&tab.on_debounce(chart_suggestion(), tag));
    assert_eq!(lookup[0].tag, tag);

    // Typing again before the result arrives
    tab.handle_key_events(char_key('i'));
    tab.apply(
        chart_suggestion(),
        tag,
        Ok(Payload::Suggestions(vec!["bitnami/nginx".to_string()])),
    );
    assert!(tab.install_wizard().input(INSTALL_CHART).unwrap().suggestions().is_empty());
}

#[test]
fn test_trigger_for_a_blurred_input_is_ignored() {
    let (_dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);
    on_chart_step(&mut tab);

    let tag = schedule_tag(&tab.handle_key_events(char_key('n')));
    tab.handle_key_events(key(KeyCode::Enter));
    assert!(tab.on_debounce(chart_suggestion(), tag).is_empty());
}

#[test]
fn test_version_lookup_uses_the_chart_value() {
    let (_dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);
    on_chart_step(&mut tab);
    for c in "bitnami/nginx".chars() {
        tab.handle_key_events(char_key(c));
    }
    tab.handle_key_events(key(KeyCode::Enter));

    let step = INSTALL_CHART + 1;
    let tag = schedule_tag(&tab.handle_key_events(char_key('1')));
    let requests = dispatched(&tab.on_debounce(
        Target::Suggestion {
            wizard: ReleaseWizard::Install,
            step,
        },
        tag,
    ));
    assert_eq!(
        requests[0].operation,
        Operation::Helm(HelmCommand::SearchVersions {
            chart: "bitnami/nginx".to_string()
        })
    );
}

#[test]
fn test_clearing_the_chart_query_skips_the_lookup() {
    let (_dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);
    on_chart_step(&mut tab);

    tab.handle_key_events(char_key('n'));
    let tag = schedule_tag(&tab.handle_key_events(key(KeyCode::Backspace)));
    assert!(tab.on_debounce(chart_suggestion(), tag).is_empty());
}
