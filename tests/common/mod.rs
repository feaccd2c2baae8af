#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helmtui::catalog::CatalogClient;
use helmtui::helm::models::HubPackage;
use helmtui::helm::{CommandOutput, CommandRunner, HelmError};
use helmtui::ui::core::{Effect, Request, TabContext};
use helmtui::workspace::Workspace;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Runner answering from a script keyed by the joined argv.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, argv: &str, stdout: &str) {
        self.responses.lock().unwrap().insert(
            argv.to_string(),
            CommandOutput {
                stdout: stdout.to_string(),
                ..Default::default()
            },
        );
    }

    pub fn fail(&self, argv: &str, status: i32, stderr: &str) {
        self.responses.lock().unwrap().insert(
            argv.to_string(),
            CommandOutput {
                stderr: stderr.to_string(),
                status,
                ..Default::default()
            },
        );
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, argv: &str) -> usize {
        self.calls().iter().filter(|call| call.join(" ") == argv).count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, HelmError> {
        self.calls.lock().unwrap().push(argv.to_vec());
        let key = argv.join(" ");
        let output = self.responses.lock().unwrap().get(&key).cloned();
        Ok(output.unwrap_or_default())
    }

    fn program(&self) -> &str {
        "helm"
    }
}

/// Catalog client that returns nothing.
#[derive(Default)]
pub struct EmptyCatalog;

#[async_trait]
impl CatalogClient for EmptyCatalog {
    async fn search(&self, _query: &str) -> Result<Vec<HubPackage>, HelmError> {
        Ok(Vec::new())
    }

    async fn default_values(&self, _package_id: &str, _version: &str) -> Result<String, HelmError> {
        Ok(String::new())
    }
}

pub fn context() -> (TempDir, TabContext) {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::at(dir.path().join(".helm-tui")).unwrap();
    let ctx = TabContext {
        workspace,
        debounce: Duration::from_millis(500),
    };
    (dir, ctx)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Requests among `effects`, in order.
pub fn dispatched(effects: &[Effect]) -> Vec<Request> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Dispatch(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

pub fn release_row(name: &str, namespace: &str) -> Vec<String> {
    vec![
        name.to_string(),
        namespace.to_string(),
        "1".to_string(),
        "2024-01-01 10:00:00.000000 +0000 UTC".to_string(),
        "deployed".to_string(),
        "nginx-1.0.0".to_string(),
        "1.25".to_string(),
    ]
}
