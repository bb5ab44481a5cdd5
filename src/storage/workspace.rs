//! Workspace management
//!
//! A workspace is a directory with a `.pulse/` subdirectory holding the
//! project store and configuration. Handles initialization and discovery.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, ProjectStore};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a pulse workspace. Run 'pulse init' first.")]
    NotInWorkspace,
}

/// A pulse workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let pulse_dir = root.join(".pulse");

        if !pulse_dir.is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_workspace_root().ok_or(WorkspaceError::NotInWorkspace)?;
        Self::open(root)
    }

    /// Initializes a new workspace at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let pulse_dir = root.join(".pulse");

        fs::create_dir_all(&pulse_dir).with_context(|| {
            format!("Failed to create .pulse directory: {}", pulse_dir.display())
        })?;

        let config_path = pulse_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# pulse configuration

# Default output format for commands: "text" or "json"
# default_format = "text"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = pulse_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore in-flight write buffers
*.tmp
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .pulse directory path
    pub fn pulse_dir(&self) -> PathBuf {
        self.root.join(".pulse")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the project store
    pub fn store(&self) -> ProjectStore {
        ProjectStore::for_workspace(&self.root)
    }
}
