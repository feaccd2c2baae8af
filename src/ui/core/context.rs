use crate::config::Config;
use crate::workspace::Workspace;
use std::time::Duration;

/// Settings shared by every tab at construction time.
#[derive(Debug, Clone)]
pub struct TabContext {
    pub workspace: Workspace,
    pub debounce: Duration,
}

impl TabContext {
    pub fn new(workspace: Workspace, config: &Config) -> Self {
        Self {
            workspace,
            debounce: config.ui.debounce(),
        }
    }
}
