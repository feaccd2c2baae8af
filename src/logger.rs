use crate::config::LoggingConfig;
use crate::constants::LOG_BUFFER_CAPACITY;
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
///
/// Every `log` macro call lands in an in-memory buffer (shown with "G") and,
/// when logging is enabled, in `debug.log` inside the working directory.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    log_file: Option<PathBuf>,
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            log_file: None,
        }
    }

    pub fn from_config(config: &LoggingConfig, log_file: &Path) -> Self {
        Self {
            log_file: config.enabled.then(|| log_file.to_path_buf()),
            ..Self::new()
        }
    }

    /// File logging is active
    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == LOG_BUFFER_CAPACITY {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Build the fern dispatch feeding this logger.
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let buffer = self.clone();
        let level = if self.is_enabled() {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {} {}: {}",
                    timestamp(),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .level_for("reqwest", LevelFilter::Warn)
            .level_for("hyper", LevelFilter::Warn)
            .level_for("hyper_util", LevelFilter::Warn)
            .chain(fern::Output::call(move |record| buffer.push(record.args().to_string())));

        if let Some(path) = &self.log_file {
            let file =
                fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install as the global `log` backend.
    pub fn install(&self) -> Result<()> {
        self.dispatch()?
            .apply()
            .context("A global logger is already installed")
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
