//! Persistent working location under the home directory.
//!
//! Values files handed to the editor are written below it, one directory per
//! namespace and release. Failing to create it is the only fatal startup error.

use crate::constants::{LOG_FILE_NAME, VALUES_FILE_NAME, WORKDIR_NAME};
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create (if needed) `~/.helm-tui`.
    pub fn acquire() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Self::at(home.join(WORKDIR_NAME))
    }

    /// Create (if needed) and use `root`.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create working directory: {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE_NAME)
    }

    /// `<root>/<namespace>/<release>`, or `None` unless both names are plain
    /// path segments. The result always lies strictly below the root.
    pub fn release_dir(&self, namespace: &str, release: &str) -> Option<PathBuf> {
        if check_name("namespace", namespace).is_err() || check_name("release", release).is_err() {
            log::warn!("Workspace: refusing path for {:?}/{:?}", namespace, release);
            return None;
        }
        let dir = self.root.join(namespace).join(release);
        let below_root = dir
            .strip_prefix(&self.root)
            .is_ok_and(|rest| rest.components().count() == 2 && rest.components().all(|c| matches!(c, Component::Normal(_))));
        below_root.then_some(dir)
    }

    /// `<root>/<namespace>/<release>/values.yaml`
    pub fn values_file(&self, namespace: &str, release: &str) -> Option<PathBuf> {
        self.release_dir(namespace, release).map(|dir| dir.join(VALUES_FILE_NAME))
    }

    /// Write editor content, creating parent directories.
    pub fn write_values(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create values directory: {}", parent.display()))?;
        }
        std::fs::write(path, content).with_context(|| format!("Failed to write values file: {}", path.display()))
    }
}

/// A release or namespace name usable as one directory below the workspace.
pub fn check_name(what: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("The {} name is required", what));
    }
    let single_segment = matches!(
        Path::new(name).components().collect::<Vec<_>>().as_slice(),
        [Component::Normal(segment)] if *segment == std::ffi::OsStr::new(name)
    );
    if name == "." || name == ".." || name.contains(['/', '\\']) || !single_segment {
        return Err(format!("Invalid {} name: {}", what, name));
    }
    Ok(())
}
