//! Configuration handling for the TUI

use crate::environment::{ApiTarget, Environment};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Origin token used when none is configured
pub const DEFAULT_FROM: &str = "/";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InviteConfig {
    /// Where the skip action returns to, handed back with each submission
    pub from: Option<String>,
    /// Embedded mode hides the title banner and the skip action
    pub embed: Option<bool>,
    /// Force an API target instead of detecting one
    pub api_mode: Option<ApiTarget>,
    /// JSON message catalog for translated labels
    pub messages: Option<PathBuf>,
    /// Outbox file for queued invites
    pub outbox_path: Option<PathBuf>,
}

impl InviteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "invite", "invite-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        match path {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: InviteConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_or_default(&self) -> &str {
        self.from
            .as_deref()
            .filter(|from| !from.is_empty())
            .unwrap_or(DEFAULT_FROM)
    }

    pub fn is_embedded(&self) -> bool {
        self.embed.unwrap_or(false)
    }

    /// Configured API target, falling back to environment detection
    pub fn api_target(&self, environment: &Environment) -> ApiTarget {
        self.api_mode.unwrap_or_else(|| environment.api_target())
    }
}
