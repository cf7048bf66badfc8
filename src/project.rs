use crate::config::Config;
use crate::plugins::ResourceKind;
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLAUDE_DIR: &str = ".claude";
pub const DEFAULT_PLUGINS_DIR: &str = "plugins";
pub const DEFAULT_STATE_FILE: &str = "cc-manager.state.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const DOC_FILE: &str = "CLAUDE.md";
pub const LOCK_FILE: &str = "cc-manager.lock";

/// Resolved on-disk layout of a project's `.claude` directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    claude_dir: PathBuf,
    plugins_dir: PathBuf,
    state_file: PathBuf,
}

impl Project {
    /// Resolve the layout for a project root on disk
    pub fn detect(root: &Path, config: &Config) -> Self {
        // Canonicalize so symlink targets written during sync are absolute
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self::with_root(root, config)
    }

    /// Build the layout for a known root without touching the filesystem
    pub fn with_root(root: PathBuf, config: &Config) -> Self {
        let claude_dir = resolve(
            &root,
            config.paths.claude_dir.as_deref().unwrap_or(DEFAULT_CLAUDE_DIR),
        );
        let plugins_dir = resolve(
            &claude_dir,
            config
                .paths
                .plugins_dir
                .as_deref()
                .unwrap_or(DEFAULT_PLUGINS_DIR),
        );
        let state_file = resolve(
            &claude_dir,
            config
                .paths
                .state_file
                .as_deref()
                .unwrap_or(DEFAULT_STATE_FILE),
        );

        Self {
            root,
            claude_dir,
            plugins_dir,
            state_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub fn live_settings(&self) -> PathBuf {
        self.claude_dir.join(SETTINGS_FILE)
    }

    pub fn live_doc(&self) -> PathBuf {
        self.claude_dir.join(DOC_FILE)
    }

    pub fn live_dir(&self, kind: ResourceKind) -> PathBuf {
        self.claude_dir.join(kind.dir_name())
    }

    pub fn lock_file(&self) -> PathBuf {
        self.claude_dir.join(LOCK_FILE)
    }
}

/// Expand `~` and join relative paths onto `base`
fn resolve(base: &Path, value: &str) -> PathBuf {
    let expanded = expand_tilde(value).unwrap_or_else(|| PathBuf::from(value));
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let project = Project::with_root(PathBuf::from("/work"), &Config::default());
        assert_eq!(project.claude_dir(), Path::new("/work/.claude"));
        assert_eq!(project.plugins_dir(), Path::new("/work/.claude/plugins"));
        assert_eq!(
            project.state_file(),
            Path::new("/work/.claude/cc-manager.state.json")
        );
        assert_eq!(
            project.live_settings(),
            PathBuf::from("/work/.claude/settings.json")
        );
        assert_eq!(project.live_doc(), PathBuf::from("/work/.claude/CLAUDE.md"));
        assert_eq!(
            project.live_dir(ResourceKind::Agents),
            PathBuf::from("/work/.claude/agents")
        );
        assert_eq!(
            project.live_dir(ResourceKind::Commands),
            PathBuf::from("/work/.claude/commands")
        );
    }

    #[test]
    fn test_configured_layout() {
        let mut config = Config::default();
        config.paths.claude_dir = Some("config/claude".to_string());
        config.paths.plugins_dir = Some("/opt/plugins".to_string());
        config.paths.state_file = Some("state.json".to_string());

        let project = Project::with_root(PathBuf::from("/work"), &config);
        assert_eq!(project.claude_dir(), Path::new("/work/config/claude"));
        assert_eq!(project.plugins_dir(), Path::new("/opt/plugins"));
        assert_eq!(
            project.state_file(),
            Path::new("/work/config/claude/state.json")
        );
        assert_eq!(
            project.lock_file(),
            PathBuf::from("/work/config/claude/cc-manager.lock")
        );
    }
}
