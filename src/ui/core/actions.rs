use crate::catalog::CatalogQuery;
use crate::constants::{TAB_HUB, TAB_PLUGINS, TAB_RELEASES, TAB_REPOSITORIES};
use crate::helm::{HelmCommand, HelmError, Payload};
use crate::ui::tabs::{hub, plugins, releases, repositories};
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Releases,
    Repositories,
    Hub,
    Plugins,
}

impl TabId {
    pub const ALL: [TabId; 4] = [TabId::Releases, TabId::Repositories, TabId::Hub, TabId::Plugins];

    pub fn title(self) -> &'static str {
        match self {
            TabId::Releases => TAB_RELEASES,
            TabId::Repositories => TAB_REPOSITORIES,
            TabId::Hub => TAB_HUB,
            TabId::Plugins => TAB_PLUGINS,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// An external operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Helm(HelmCommand),
    Catalog(CatalogQuery),
}

impl Operation {
    /// Mutating operations change external state; reads are safe to re-issue.
    pub fn is_mutating(&self) -> bool {
        match self {
            Operation::Helm(command) => command.is_mutating(),
            Operation::Catalog(_) => false,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Operation::Helm(command) => format!("helm {}", command.argv().join(" ")),
            Operation::Catalog(CatalogQuery::Search { query }) => format!("catalog search '{}'", query),
            Operation::Catalog(CatalogQuery::DefaultValues { package_id, version }) => {
                format!("catalog values {}@{}", package_id, version)
            }
        }
    }
}

impl From<HelmCommand> for Operation {
    fn from(command: HelmCommand) -> Self {
        Operation::Helm(command)
    }
}

impl From<CatalogQuery> for Operation {
    fn from(query: CatalogQuery) -> Self {
        Operation::Catalog(query)
    }
}

/// Surface an outcome is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Releases(releases::Target),
    Repositories(repositories::Target),
    Hub(hub::Target),
    Plugins(plugins::Target),
    /// Content written to disk before the editor opens
    EditorSource,
}

/// A dispatched operation awaiting its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub target: Target,
    pub tag: u64,
    pub operation: Operation,
}

impl Request {
    pub fn new(target: Target, tag: u64, operation: impl Into<Operation>) -> Self {
        Self {
            target,
            tag,
            operation: operation.into(),
        }
    }
}

/// The single result of one [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target: Target,
    pub tag: u64,
    pub result: Result<Payload, HelmError>,
}

/// Persist the output of `source` to `path`, then hand the terminal to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRequest {
    pub source: Operation,
    pub path: PathBuf,
}

/// Work a component asks the application to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Request),
    /// Deliver `DebounceElapsed` after `delay`
    Schedule { target: Target, tag: u64, delay: Duration },
    Edit(EditorRequest),
    /// Remove a values directory once its release operation finished
    RemoveDir(PathBuf),
}

/// Messages processed by the event loop, one at a time
#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyEvent),
    Resize(u16, u16),
    Completed(Outcome),
    DebounceElapsed { target: Target, tag: u64 },
    EditorFinished(Result<(), String>),
    Quit,
    None,
}
