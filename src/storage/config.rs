//! Workspace configuration
//!
//! Read from `.pulse/config.toml`. A missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Workspace-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format for CLI commands ("text" or "json")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Loads configuration from the given file, defaulting when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Loads the configuration for a workspace root
    pub fn for_workspace(root: &Path) -> Result<Self> {
        Self::load(&root.join(".pulse").join("config.toml"))
    }

    /// Walks up from the current directory looking for a `.pulse` directory
    pub fn find_workspace_root() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;

        loop {
            if dir.join(".pulse").is_dir() {
                return Some(dir);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_default_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, r#"default_format = "json""#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = [").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
