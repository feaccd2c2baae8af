use helmtui::helm::HelmError;
use helmtui::helm::Payload;
use helmtui::ui::core::actions::{Effect, Request, Target};
use helmtui::ui::core::{Debouncer, Focus, FocusManager, RefreshCoordinator, SubView, View, ViewState};
use helmtui::ui::tabs::releases::{self, Detail, ReleaseWizard};
use helmtui::helm::HelmCommand;
use std::time::Duration;

#[test]
fn test_view_selects_first_detail_and_cycles() {
    let mut view: ViewState<Detail, ReleaseWizard> = ViewState::new();
    assert!(view.is_list());

    // Cycling does nothing outside a detail
    view.next();
    assert_eq!(view.current(), View::List);

    assert!(view.select());
    assert_eq!(view.detail(), Some(Detail::History));
    assert!(!view.select());

    view.next();
    assert_eq!(view.detail(), Some(Detail::Notes));

    view.previous();
    view.previous();
    assert_eq!(view.detail(), Some(Detail::Manifest));

    for _ in 0..Detail::ALL.len() {
        view.next();
    }
    assert_eq!(view.detail(), Some(Detail::Manifest));

    view.back();
    assert!(view.is_list());
}

#[test]
fn test_wizard_view_and_back() {
    let mut view: ViewState<Detail, ReleaseWizard> = ViewState::new();
    view.select();
    view.open_wizard(ReleaseWizard::Upgrade);
    assert_eq!(view.wizard(), Some(ReleaseWizard::Upgrade));
    assert_eq!(view.detail(), None);

    view.back();
    assert_eq!(view.current(), View::List);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Left,
    Right,
}

#[test]
fn test_focus_is_held_by_exactly_one_surface() {
    let mut focus: FocusManager<Panel, ()> = FocusManager::new(Panel::Left);
    assert!(focus.is_panel_focused(Panel::Left));

    focus.focus_panel(Panel::Right);
    assert!(!focus.is_panel_focused(Panel::Left));
    assert_eq!(focus.focused_panel(), Some(Panel::Right));

    focus.focus_input(());
    assert_eq!(focus.current(), Focus::Input(()));
    assert_eq!(focus.focused_panel(), None);
    assert!(!focus.is_panel_focused(Panel::Right));

    focus.return_to_primary();
    assert_eq!(focus.current(), Focus::Panel(Panel::Left));
    assert_eq!(focus.focused_input(), None);
}

#[test]
fn test_debouncer_only_latest_tag_is_current() {
    let target = Target::Releases(releases::Target::Suggestion {
        wizard: ReleaseWizard::Install,
        step: releases::INSTALL_CHART,
    });
    let mut debouncer = Debouncer::new(Duration::from_millis(500));

    let first = debouncer.keystroke(target.clone());
    let second = debouncer.keystroke(target.clone());
    let (Effect::Schedule { tag: t1, .. }, Effect::Schedule { tag: t2, delay, .. }) = (first, second) else {
        panic!("keystrokes schedule triggers");
    };
    assert_eq!(delay, Duration::from_millis(500));
    assert!(!debouncer.is_current(t1));
    assert!(debouncer.is_current(t2));

    debouncer.invalidate();
    assert!(!debouncer.is_current(t2));
}

#[test]
fn test_fan_out_needs_a_selection() {
    let request = |detail: Detail, row: &Vec<String>| {
        Request::new(
            Target::Releases(releases::Target::Detail(detail)),
            1,
            HelmCommand::History {
                release: row[0].clone(),
                namespace: row[1].clone(),
            },
        )
    };

    assert!(RefreshCoordinator::fan_out(Detail::ALL, None, request).is_empty());

    let row = vec!["web".to_string(), "default".to_string()];
    let effects = RefreshCoordinator::fan_out(&[Detail::History, Detail::Notes], Some(&row), request);
    assert_eq!(effects.len(), 2);
}

#[test]
fn test_after_mutation_refreshes_only_on_success() {
    let refresh = || Request::new(Target::Plugins(helmtui::ui::tabs::plugins::Target::List), 3, HelmCommand::PluginList);

    let ok: Result<Payload, HelmError> = Ok(Payload::Done(String::new()));
    assert_eq!(RefreshCoordinator::after_mutation(&ok, refresh), vec![Effect::Dispatch(refresh())]);

    let failed: Result<Payload, HelmError> = Err(HelmError::Catalog("boom".to_string()));
    assert!(RefreshCoordinator::after_mutation(&failed, refresh).is_empty());
}
