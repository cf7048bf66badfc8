use crate::cli::Cli;
use crate::error::Result;
use crate::utils::path::home_dir;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = ".cc-manager.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

/// Locations of the managed files. Unset values fall back to the defaults in
/// [`crate::project`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathsConfig {
    /// Claude configuration directory, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_dir: Option<String>,

    /// Plugins root, relative to the Claude directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<String>,

    /// Enablement state file, relative to the Claude directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Hold an exclusive lock file around state changes and regeneration.
    /// Unset means enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<bool>,
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Project config (.cc-manager.toml in project root)
    /// 4. Global config (~/.cc-manager.toml)
    /// 5. Built-in defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(CONFIG_FILE);
            if global_config.exists() {
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        let project_config = project_root.join(CONFIG_FILE);
        if project_config.exists() {
            config = config.merge(Self::from_file(&project_config)?);
        }

        Ok(config.merge_env())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(mut self, other: Self) -> Self {
        if other.paths.claude_dir.is_some() {
            self.paths.claude_dir = other.paths.claude_dir;
        }
        if other.paths.plugins_dir.is_some() {
            self.paths.plugins_dir = other.paths.plugins_dir;
        }
        if other.paths.state_file.is_some() {
            self.paths.state_file = other.paths.state_file;
        }

        if other.sync.lock.is_some() {
            self.sync.lock = other.sync.lock;
        }

        self
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Self {
        if let Some(dir) = non_empty_env("CC_MANAGER_CLAUDE_DIR") {
            self.paths.claude_dir = Some(dir);
        }
        if let Some(dir) = non_empty_env("CC_MANAGER_PLUGINS_DIR") {
            self.paths.plugins_dir = Some(dir);
        }
        if let Some(value) = non_empty_env("CC_MANAGER_NO_LOCK") {
            if value != "0" && !value.eq_ignore_ascii_case("false") {
                self.sync.lock = Some(false);
            }
        }
        self
    }

    /// Apply CLI overrides (highest precedence)
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.claude_dir {
            self.paths.claude_dir = Some(dir.to_string_lossy().to_string());
        }
        if cli.no_lock {
            self.sync.lock = Some(false);
        }
        self
    }

    /// Whether state changes run under the exclusive lock file
    pub fn lock_enabled(&self) -> bool {
        self.sync.lock.unwrap_or(true)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
