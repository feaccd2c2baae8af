//! The four application tabs.
//!
//! Each tab owns its panels, wizards, focus and view state, implements
//! [`Component`](crate::ui::core::Component) and handles the outcomes
//! addressed to its own `Target` enum.

pub mod hub;
pub mod plugins;
pub mod releases;
pub mod repositories;

pub use hub::HubTab;
pub use plugins::PluginsTab;
pub use releases::ReleasesTab;
pub use repositories::RepositoriesTab;

use crate::constants::DEFAULT_NAMESPACE;
use crate::ui::components::InputEvent;
use crate::ui::core::actions::{Effect, Operation, Target};
use crate::ui::core::wizard::{Advance, Wizard};
use crate::workspace::check_name;
use crossterm::event::KeyEvent;

/// What a key did to an open wizard.
#[derive(Debug)]
pub(crate) enum WizardKey {
    Effects(Vec<Effect>),
    Completed(Operation),
    Cancelled,
}

/// Route a key to the focused step of `wizard`.
///
/// Edits on a suggesting step schedule a debounced lookup addressed to
/// `suggestion_target(step)`.
pub(crate) fn drive_wizard<C>(
    wizard: &mut Wizard<C>,
    key: KeyEvent,
    suggestion_target: impl Fn(usize) -> Target,
) -> WizardKey {
    let step = wizard.current();
    let suggests = wizard.current_suggests();
    let Some(input) = wizard.current_input_mut() else {
        return WizardKey::Cancelled;
    };

    match input.handle_key(key) {
        InputEvent::Cancelled => {
            wizard.cancel();
            WizardKey::Cancelled
        }
        InputEvent::Edited if suggests => match input.debouncer_mut() {
            Some(debouncer) => WizardKey::Effects(vec![debouncer.keystroke(suggestion_target(step))]),
            None => WizardKey::Effects(Vec::new()),
        },
        InputEvent::Submitted => match wizard.advance() {
            Advance::Complete(operation) => WizardKey::Completed(operation),
            Advance::Suspend(request) => WizardKey::Effects(vec![Effect::Edit(request)]),
            Advance::Moved(_) | Advance::Parked | Advance::Inactive => WizardKey::Effects(Vec::new()),
        },
        InputEvent::Edited | InputEvent::Moved | InputEvent::Ignored => WizardKey::Effects(Vec::new()),
    }
}

/// Empty namespace means the default one.
pub(crate) fn namespace_or_default(value: &str) -> String {
    if value.trim().is_empty() {
        DEFAULT_NAMESPACE.to_string()
    } else {
        value.trim().to_string()
    }
}

pub(crate) fn check_release(value: &str) -> Result<(), String> {
    check_name("release", value)
}

/// Empty stands for the default namespace
pub(crate) fn check_namespace(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    check_name("namespace", value)
}

/// Shared y/n answer of the "edit values" branch step
pub(crate) fn is_yes(value: &str) -> bool {
    value == "y"
}

pub(crate) fn is_no(value: &str) -> bool {
    value == "n"
}
