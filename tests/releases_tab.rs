mod common;

use common::{char_key, context, dispatched, key, release_row};
use crossterm::event::KeyCode;
use helmtui::helm::commands::GetKind;
use helmtui::helm::{HelmCommand, HelmError, Payload};
use helmtui::ui::core::actions::{self, Effect, Operation, Request};
use helmtui::ui::core::{Component, SubView, View};
use helmtui::ui::tabs::releases::{self, Detail, Pane, ReleaseWizard, Target};
use helmtui::ui::tabs::ReleasesTab;
use std::collections::HashSet;
use std::path::PathBuf;

fn tab_target(request: &Request) -> Target {
    match &request.target {
        actions::Target::Releases(t) => t.clone(),
        other => panic!("outcome for another tab: {:?}", other),
    }
}

/// A tab whose list holds `web` and `api`, detail prefetches discarded.
fn loaded_tab() -> (tempfile::TempDir, ReleasesTab) {
    let (dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);
    let init = dispatched(&tab.init());
    assert_eq!(init.len(), 1);
    assert_eq!(init[0].operation, Operation::Helm(HelmCommand::ListReleases));

    tab.apply(
        Target::List,
        init[0].tag,
        Ok(Payload::Rows(vec![release_row("web", "default"), release_row("api", "prod")])),
    );
    (dir, tab)
}

fn type_text(tab: &mut ReleasesTab, text: &str) -> Vec<Effect> {
    text.chars().flat_map(|c| tab.handle_key_events(char_key(c))).collect()
}

#[test]
fn test_list_load_selects_first_row() {
    let (_dir, tab) = loaded_tab();
    assert_eq!(tab.releases().len(), 2);
    assert_eq!(tab.releases().selected_cell(0), Some("web"));
    assert!(tab.focus().is_panel_focused(Pane::Releases));
    assert!(tab.releases().is_focused());
}

#[test]
fn test_entering_detail_fetches_every_sub_view() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(key(KeyCode::Down));

    let requests = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));
    assert_eq!(tab.view(), View::Detail(Detail::History));
    assert!(tab.releases().is_pinned());
    assert_eq!(tab.releases().rows().len(), 1);
    assert!(tab.focus().is_panel_focused(Pane::Detail));

    assert_eq!(requests.len(), Detail::ALL.len());
    let details: HashSet<Detail> = requests
        .iter()
        .map(|r| match tab_target(r) {
            Target::Detail(d) => d,
            other => panic!("unexpected target {:?}", other),
        })
        .collect();
    assert_eq!(details.len(), Detail::ALL.len());

    for request in &requests {
        match &request.operation {
            Operation::Helm(HelmCommand::History { release, namespace })
            | Operation::Helm(HelmCommand::Get { release, namespace, .. }) => {
                assert_eq!((release.as_str(), namespace.as_str()), ("api", "prod"));
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }
}

#[test]
fn test_one_failing_sub_view_only_marks_itself() {
    let (_dir, mut tab) = loaded_tab();
    let requests = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));

    for request in requests {
        let Target::Detail(detail) = tab_target(&request) else {
            unreachable!()
        };
        let result = match detail {
            Detail::History => Ok(Payload::Rows(vec![vec![
                "1".to_string(),
                "2024-01-01".to_string(),
                "deployed".to_string(),
                "nginx-1.0.0".to_string(),
                "1.25".to_string(),
                "Install complete".to_string(),
            ]])),
            Detail::Hooks => Err(HelmError::CommandFailed {
                program: "helm".to_string(),
                status: 1,
                stderr: "Error: hooks unavailable".to_string(),
            }),
            _ => Ok(Payload::Text(format!("{} content", detail.title()))),
        };
        tab.apply(Target::Detail(detail), request.tag, result);
    }

    let hooks = tab.text_panel(Detail::Hooks).unwrap();
    assert!(hooks.notice().unwrap().is_error());
    assert!(hooks.content().is_empty());

    for detail in [Detail::Notes, Detail::Metadata, Detail::Values, Detail::Manifest] {
        let panel = tab.text_panel(detail).unwrap();
        assert!(panel.notice().is_none(), "{:?} should be clean", detail);
        assert_eq!(panel.content(), format!("{} content", detail.title()));
    }
    assert_eq!(tab.history().len(), 1);
    assert!(tab.history().notice().is_none());
}

#[test]
fn test_stale_detail_outcome_is_ignored() {
    let (_dir, mut tab) = loaded_tab();
    let first = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));
    tab.handle_key_events(key(KeyCode::Esc));
    let second = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));

    let notes_tag = |requests: &[Request]| {
        requests
            .iter()
            .find(|r| tab_target(r) == Target::Detail(Detail::Notes))
            .map(|r| r.tag)
            .unwrap()
    };
    let (old, new) = (notes_tag(&first), notes_tag(&second));
    assert_ne!(old, new);

    tab.apply(Target::Detail(Detail::Notes), new, Ok(Payload::Text("fresh".to_string())));
    tab.apply(Target::Detail(Detail::Notes), old, Ok(Payload::Text("stale".to_string())));
    assert_eq!(tab.text_panel(Detail::Notes).unwrap().content(), "fresh");
}

#[test]
fn test_detail_views_cycle_and_escape_restores_list() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(key(KeyCode::Enter));

    tab.handle_key_events(key(KeyCode::Tab));
    assert_eq!(tab.view(), View::Detail(Detail::Notes));
    assert!(tab.text_panel(Detail::Notes).unwrap().is_focused());
    assert!(!tab.history().is_focused());

    tab.handle_key_events(key(KeyCode::BackTab));
    tab.handle_key_events(key(KeyCode::BackTab));
    assert_eq!(tab.view(), View::Detail(Detail::Manifest));

    tab.handle_key_events(key(KeyCode::Esc));
    assert_eq!(tab.view(), View::List);
    assert!(!tab.releases().is_pinned());
    assert_eq!(tab.releases().len(), 2);
    assert!(tab.releases().is_focused());
}

#[test]
fn test_delete_without_selection_reports_and_dispatches_nothing() {
    let (_dir, ctx) = context();
    let mut tab = ReleasesTab::new(&ctx);

    let effects = tab.handle_key_events(char_key('d'));
    assert!(effects.is_empty());
    let notice = tab.releases().notice().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.text, "No release selected");

    // Enter without a selection stays on the list
    assert!(tab.handle_key_events(key(KeyCode::Enter)).is_empty());
    assert_eq!(tab.view(), View::List);
}

#[test]
fn test_uninstall_success_returns_to_list_and_refreshes() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(key(KeyCode::Down));
    tab.handle_key_events(key(KeyCode::Enter));

    let requests = dispatched(&tab.handle_key_events(char_key('d')));
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].operation,
        Operation::Helm(HelmCommand::Uninstall {
            release: "api".to_string(),
            namespace: "prod".to_string(),
        })
    );
    assert_eq!(tab_target(&requests[0]), Target::Uninstall);

    let effects = tab.apply(Target::Uninstall, 0, Ok(Payload::Done(String::new())));
    assert_eq!(tab.view(), View::List);
    assert_eq!(tab.releases().selected_index(), Some(0));
    assert_eq!(tab.releases().notice().unwrap().text, "Release uninstalled");

    let refresh = dispatched(&effects);
    assert_eq!(refresh.len(), 1);
    assert_eq!(refresh[0].operation, Operation::Helm(HelmCommand::ListReleases));
    assert!(tab.releases().accepts(refresh[0].tag));
}

#[test]
fn test_failed_uninstall_stays_put_without_refresh() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(key(KeyCode::Enter));

    let effects = tab.apply(
        Target::Uninstall,
        0,
        Err(HelmError::CommandFailed {
            program: "helm".to_string(),
            status: 1,
            stderr: "Error: forbidden".to_string(),
        }),
    );
    assert!(effects.is_empty());
    assert_eq!(tab.view(), View::Detail(Detail::History));
    assert!(tab.releases().notice().unwrap().text.contains("forbidden"));
}

#[test]
fn test_rollback_uses_selected_revision() {
    let (_dir, mut tab) = loaded_tab();
    let requests = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));
    let history = requests
        .iter()
        .find(|r| tab_target(r) == Target::Detail(Detail::History))
        .unwrap();
    tab.apply(
        Target::Detail(Detail::History),
        history.tag,
        Ok(Payload::Rows(vec![
            vec!["2".to_string(); 6],
            vec!["1".to_string(); 6],
        ])),
    );
    tab.handle_key_events(key(KeyCode::Down));

    let rollback = dispatched(&tab.handle_key_events(char_key('R')));
    assert_eq!(
        rollback[0].operation,
        Operation::Helm(HelmCommand::Rollback {
            release: "web".to_string(),
            namespace: "default".to_string(),
            revision: "1".to_string(),
        })
    );

    // Rollback is only offered on the history view
    tab.handle_key_events(key(KeyCode::Tab));
    assert!(tab.handle_key_events(char_key('R')).is_empty());
}

#[test]
fn test_install_wizard_with_edited_values() {
    let (dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('i'));
    assert_eq!(tab.view(), View::Wizard(ReleaseWizard::Install));
    assert!(tab.captures_input());
    assert!(!tab.releases().is_focused());

    // Release name is a plain step: no lookups
    assert!(type_text(&mut tab, "web2").is_empty());
    tab.handle_key_events(key(KeyCode::Enter));

    let scheduled = type_text(&mut tab, "nginx");
    assert_eq!(scheduled.len(), 5);
    assert!(scheduled.iter().all(|e| matches!(e, Effect::Schedule { .. })));
    tab.handle_key_events(key(KeyCode::Enter));
    type_text(&mut tab, "15.0.0");
    tab.handle_key_events(key(KeyCode::Enter));
    type_text(&mut tab, "apps");
    tab.handle_key_events(key(KeyCode::Enter));

    // Unrecognized answer parks on the values step
    type_text(&mut tab, "x");
    assert!(tab.handle_key_events(key(KeyCode::Enter)).is_empty());
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_VALUES);
    tab.handle_key_events(key(KeyCode::Backspace));

    type_text(&mut tab, "y");
    let effects = tab.handle_key_events(key(KeyCode::Enter));
    let values_file = dir.path().join(".helm-tui").join("apps").join("web2").join("values.yaml");
    assert_eq!(
        effects,
        vec![Effect::Edit(actions::EditorRequest {
            source: Operation::Helm(HelmCommand::ShowValues {
                chart: "nginx".to_string(),
                version: "15.0.0".to_string(),
            }),
            path: values_file.clone(),
        })]
    );

    tab.on_editor_finished(Ok(()));
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_VALUES + 1);

    let requests = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));
    assert_eq!(
        requests[0].operation,
        Operation::Helm(HelmCommand::Install {
            release: "web2".to_string(),
            chart: "nginx".to_string(),
            version: "15.0.0".to_string(),
            namespace: "apps".to_string(),
            values: Some(values_file),
        })
    );
    assert_eq!(tab.view(), View::List);
    assert!(!tab.install_wizard().is_active());
    assert!(tab.releases().is_focused());

    let effects = tab.apply(tab_target(&requests[0]), 0, Ok(Payload::Done(String::new())));
    assert_eq!(
        effects[0],
        Effect::RemoveDir(dir.path().join(".helm-tui").join("apps").join("web2"))
    );
    assert_eq!(dispatched(&effects)[0].operation, Operation::Helm(HelmCommand::ListReleases));
}

#[test]
fn test_install_without_values_defaults_namespace() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('i'));
    for answer in ["web2", "bitnami/nginx", "", "", "n"] {
        type_text(&mut tab, answer);
        tab.handle_key_events(key(KeyCode::Enter));
    }
    let requests = dispatched(&tab.handle_key_events(key(KeyCode::Enter)));
    assert_eq!(
        requests[0].operation,
        Operation::Helm(HelmCommand::Install {
            release: "web2".to_string(),
            chart: "bitnami/nginx".to_string(),
            version: String::new(),
            namespace: "default".to_string(),
            values: None,
        })
    );
}

#[test]
fn test_upgrade_current_values_come_from_the_release() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('u'));
    assert_eq!(tab.view(), View::Wizard(ReleaseWizard::Upgrade));

    type_text(&mut tab, "bitnami/nginx");
    tab.handle_key_events(key(KeyCode::Enter));
    tab.handle_key_events(key(KeyCode::Enter));
    type_text(&mut tab, "y");

    let effects = tab.handle_key_events(key(KeyCode::Enter));
    let Some(Effect::Edit(request)) = effects.first() else {
        panic!("expected an editor request, got {:?}", effects);
    };
    assert_eq!(
        request.source,
        Operation::Helm(HelmCommand::Get {
            kind: GetKind::Values,
            release: "web".to_string(),
            namespace: "default".to_string(),
        })
    );
    assert!(request.path.ends_with(PathBuf::from("default/web/values.yaml")));
}

#[test]
fn test_editor_failure_parks_wizard() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('u'));
    tab.handle_key_events(key(KeyCode::Enter));
    tab.handle_key_events(key(KeyCode::Enter));
    type_text(&mut tab, "d");
    tab.handle_key_events(key(KeyCode::Enter));

    tab.on_editor_finished(Err("Failed to start vim".to_string()));
    assert_eq!(tab.upgrade_wizard().current(), releases::UPGRADE_VALUES);
    assert_eq!(tab.upgrade_wizard().error(), Some("Failed to start vim"));
    assert_eq!(tab.view(), View::Wizard(ReleaseWizard::Upgrade));
}

#[test]
fn test_escape_cancels_wizard() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('i'));
    type_text(&mut tab, "web2");
    assert!(tab.handle_key_events(key(KeyCode::Esc)).is_empty());

    assert_eq!(tab.view(), View::List);
    assert!(!tab.captures_input());
    assert!(!tab.install_wizard().is_active());
    assert!(tab.focus().is_panel_focused(Pane::Releases));
}

#[test]
fn test_stale_list_reload_does_not_fan_out() {
    let (_dir, mut tab) = loaded_tab();
    let first = dispatched(&tab.handle_key_events(char_key('r')));
    let second = dispatched(&tab.handle_key_events(char_key('r')));

    let rows = || Ok(Payload::Rows(vec![release_row("web", "default")]));
    assert!(tab.apply(Target::List, first[0].tag, rows()).is_empty());
    assert_eq!(tab.releases().len(), 2);

    let fan_out = dispatched(&tab.apply(Target::List, second[0].tag, rows()));
    assert_eq!(tab.releases().len(), 1);
    assert_eq!(fan_out.len(), Detail::ALL.len());
}

#[test]
fn test_path_like_names_park_the_install_wizard() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('i'));

    type_text(&mut tab, "..");
    assert!(tab.handle_key_events(key(KeyCode::Enter)).is_empty());
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_RELEASE);
    assert!(tab.install_wizard().error().unwrap().contains("release"));

    tab.handle_key_events(key(KeyCode::Backspace));
    tab.handle_key_events(key(KeyCode::Backspace));
    for answer in ["web2", "bitnami/nginx", ""] {
        type_text(&mut tab, answer);
        tab.handle_key_events(key(KeyCode::Enter));
    }
    assert!(tab.install_wizard().error().is_none());
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_NAMESPACE);

    type_text(&mut tab, "../..");
    assert!(tab.handle_key_events(key(KeyCode::Enter)).is_empty());
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_NAMESPACE);
    assert!(tab.install_wizard().error().unwrap().contains("namespace"));
    assert_eq!(tab.view(), View::Wizard(ReleaseWizard::Install));
}

#[test]
fn test_removal_target_stays_inside_the_workspace() {
    let (dir, mut tab) = loaded_tab();
    let failed = || {
        Err(HelmError::CommandFailed {
            program: "helm".to_string(),
            status: 1,
            stderr: "Error: invalid release name".to_string(),
        })
    };

    for (release, namespace) in [("..", "../.."), ("web", ".."), ("a/b", "default"), ("", "default")] {
        let effects = tab.apply(
            Target::Install {
                release: release.to_string(),
                namespace: namespace.to_string(),
            },
            0,
            failed(),
        );
        assert!(
            !effects.iter().any(|e| matches!(e, Effect::RemoveDir(_))),
            "{:?}/{:?} produced {:?}",
            namespace,
            release,
            effects
        );
    }

    let effects = tab.apply(
        Target::Upgrade {
            release: "web".to_string(),
            namespace: "default".to_string(),
        },
        0,
        failed(),
    );
    let root = dir.path().join(".helm-tui");
    assert_eq!(effects, vec![Effect::RemoveDir(root.join("default").join("web"))]);
}

#[test]
fn test_uninstall_result_keeps_a_wizard_opened_meanwhile() {
    let (_dir, mut tab) = loaded_tab();
    assert_eq!(dispatched(&tab.handle_key_events(char_key('d'))).len(), 1);
    tab.handle_key_events(char_key('i'));
    type_text(&mut tab, "myrel");

    let effects = tab.apply(Target::Uninstall, 0, Ok(Payload::Done(String::new())));
    assert_eq!(dispatched(&effects)[0].operation, Operation::Helm(HelmCommand::ListReleases));

    assert_eq!(tab.view(), View::Wizard(ReleaseWizard::Install));
    assert!(tab.install_wizard().is_active());
    assert!(tab.captures_input());
    assert!(!tab.releases().is_focused());
    let input = tab.install_wizard().input(releases::INSTALL_RELEASE).unwrap();
    assert!(input.is_focused());
    assert_eq!(input.value(), "myrel");
    assert_eq!(tab.releases().selected_index(), Some(0));

    // The wizard carries on where it was
    tab.handle_key_events(key(KeyCode::Enter));
    assert_eq!(tab.install_wizard().current(), releases::INSTALL_CHART);
}

#[test]
fn test_branch_answers_are_case_sensitive() {
    let (_dir, mut tab) = loaded_tab();
    tab.handle_key_events(char_key('u'));
    tab.handle_key_events(key(KeyCode::Enter));
    tab.handle_key_events(key(KeyCode::Enter));

    for answer in ["Y", "D", "N"] {
        type_text(&mut tab, answer);
        assert!(tab.handle_key_events(key(KeyCode::Enter)).is_empty());
        assert_eq!(tab.upgrade_wizard().current(), releases::UPGRADE_VALUES);
        tab.handle_key_events(key(KeyCode::Backspace));
    }
    type_text(&mut tab, "n");
    tab.handle_key_events(key(KeyCode::Enter));
    assert_eq!(tab.upgrade_wizard().current(), releases::UPGRADE_VALUES + 1);
}
