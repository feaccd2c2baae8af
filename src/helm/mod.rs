//! Command runner abstraction for the helm binary.
//!
//! This module defines the single capability the UI needs from the outside
//! world: run an argv and capture its output. The parsed result of a command
//! travels back to the UI as a [`Payload`], failures as a [`HelmError`].

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

pub mod commands;
pub mod models;
pub mod parse;

pub use commands::HelmCommand;
pub use models::Row;

/// Error kinds surfaced by operations. All of them are recovered by the tab
/// that owns the failing surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HelmError {
    #[error("No {0} selected")]
    NoSelection(&'static str),

    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed { program: String, status: i32, stderr: String },

    #[error("Failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("Could not parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("Catalog request failed: {0}")]
    Catalog(String),
}

/// Captured result of one process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Parsed data delivered with a successful outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Rows(Vec<Row>),
    Text(String),
    Suggestions(Vec<String>),
    Done(String),
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `argv` (without the program name) to completion.
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, HelmError>;

    /// Program name used in error messages.
    fn program(&self) -> &str;
}

/// Runs the real helm binary.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, HelmError> {
        log::debug!("Runner: {} {}", self.binary, argv.join(" "));

        let output = Command::new(&self.binary)
            .args(argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| HelmError::Spawn {
                program: self.binary.clone(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Killed by a signal
            status: output.status.code().unwrap_or(-1),
        })
    }

    fn program(&self) -> &str {
        &self.binary
    }
}

/// Run a helm command and decode its output.
pub async fn execute(runner: &dyn CommandRunner, command: &HelmCommand) -> Result<Payload, HelmError> {
    let argv = command.argv();
    let output = runner.run(&argv).await?;
    if !output.success() {
        return Err(HelmError::CommandFailed {
            program: runner.program().to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        });
    }
    command.decode(&output.stdout)
}
