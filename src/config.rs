//! Configuration management for helmtui
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_CATALOG_LIMIT, DEFAULT_CATALOG_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_EDITOR,
    DEFAULT_HELM_BINARY, DEFAULT_TICK_RATE_MS, EDITOR_ENV_VAR, MAX_CATALOG_LIMIT, MAX_DEBOUNCE_MS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub helm: HelmConfig,
    pub ui: UiConfig,
    pub editor: EditorConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Helm binary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelmConfig {
    /// Program used for every helm invocation
    pub binary: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet interval in milliseconds before suggestions are fetched
    pub debounce_ms: u64,
    /// Event loop tick in milliseconds
    pub tick_rate_ms: u64,
}

/// External editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor used when $EDITOR is not set
    pub fallback: String,
}

/// Artifact Hub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Results per search
    pub limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to debug.log in the working directory
    pub enabled: bool,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_HELM_BINARY.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_EDITOR.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

impl UiConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl EditorConfig {
    /// `$EDITOR` when set and non-empty, otherwise the fallback
    pub fn command(&self) -> String {
        match std::env::var(EDITOR_ENV_VAR) {
            Ok(editor) if !editor.trim().is_empty() => editor,
            _ => self.fallback.clone(),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("helmtui.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("helmtui").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.helm.binary.trim().is_empty() {
            anyhow::bail!("helm.binary cannot be empty");
        }

        if self.ui.debounce_ms == 0 || self.ui.debounce_ms > MAX_DEBOUNCE_MS {
            anyhow::bail!(
                "debounce_ms must be between 1 and {} milliseconds, got {}",
                MAX_DEBOUNCE_MS,
                self.ui.debounce_ms
            );
        }

        if self.ui.tick_rate_ms == 0 {
            anyhow::bail!("tick_rate_ms must be greater than 0");
        }

        if self.editor.fallback.trim().is_empty() {
            anyhow::bail!("editor.fallback cannot be empty");
        }

        if self.catalog.limit == 0 || self.catalog.limit > MAX_CATALOG_LIMIT {
            anyhow::bail!(
                "catalog.limit must be between 1 and {}, got {}",
                MAX_CATALOG_LIMIT,
                self.catalog.limit
            );
        }

        if !self.catalog.base_url.starts_with("http://") && !self.catalog.base_url.starts_with("https://") {
            anyhow::bail!("Invalid catalog.base_url '{}': expected an http(s) URL", self.catalog.base_url);
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# helmtui Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("helmtui"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
