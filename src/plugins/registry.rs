//! Plugin bundles available on disk.

use super::ResourceKind;
use crate::error::{CcManagerError, Result};
use crate::project::{DOC_FILE, SETTINGS_FILE};
use crate::storage::{EntryKind, Storage};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Read-only view over the plugins root. Nothing is cached: every call goes
/// back to storage.
pub struct PluginRegistry<'a, S: Storage> {
    storage: &'a S,
    root: PathBuf,
}

impl<'a, S: Storage> PluginRegistry<'a, S> {
    pub fn new(storage: &'a S, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    pub fn plugin_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all subdirectories of the plugins root
    pub fn list_available(&self) -> Result<BTreeSet<String>> {
        if !self.storage.is_dir(&self.root) {
            return Ok(BTreeSet::new());
        }
        let names = self
            .storage
            .read_dir(&self.root)?
            .into_iter()
            .filter(|entry| match entry.kind {
                EntryKind::Dir => true,
                EntryKind::Symlink => self.storage.is_dir(&entry.path),
                EntryKind::File => false,
            })
            .map(|entry| entry.name)
            .collect();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.storage.is_dir(&self.plugin_dir(name))
    }

    /// Parsed `settings.json`, or `None` when the plugin has none
    pub fn settings_fragment(&self, name: &str) -> Result<Option<Value>> {
        let path = self.plugin_dir(name).join(SETTINGS_FILE);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        let content = self
            .storage
            .read_to_string(&path)
            .map_err(|source| CcManagerError::Read {
                path: path.clone(),
                source,
            })?;
        let value = serde_json::from_str(&content)
            .map_err(|source| CcManagerError::SettingsParse { path, source })?;
        Ok(Some(value))
    }

    /// Contents of the plugin's `CLAUDE.md`, or `None` when it has none.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn doc_fragment(&self, name: &str) -> Result<Option<String>> {
        let path = self.plugin_dir(name).join(DOC_FILE);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        let bytes = self
            .storage
            .read(&path)
            .map_err(|source| CcManagerError::Read {
                path: path.clone(),
                source,
            })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    plugin = %name,
                    path = %path.display(),
                    "documentation is not valid UTF-8, replacing invalid bytes"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(text))
    }

    /// Entries of the plugin's resource directory for `kind`, sorted by name
    pub fn resource_paths(&self, name: &str, kind: ResourceKind) -> Result<Vec<PathBuf>> {
        let dir = self.plugin_dir(name).join(kind.dir_name());
        if !self.storage.is_dir(&dir) {
            return Ok(Vec::new());
        }
        Ok(self
            .storage
            .read_dir(&dir)?
            .into_iter()
            .map(|entry| entry.path)
            .collect())
    }
}

/// Reject names that would escape the plugins root or cannot be a directory
pub fn validate_name(name: &str) -> Result<()> {
    if !is_valid_name(name) {
        return Err(CcManagerError::InvalidPluginName(name.to_string()));
    }
    Ok(())
}

/// A single, non-special path component
pub(crate) fn is_valid_name(name: &str) -> bool {
    !(name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::path::Path;

    const ROOT: &str = "/work/.claude/plugins";

    #[test]
    fn test_missing_root_lists_nothing() {
        let storage = MemoryStorage::new();
        let registry = PluginRegistry::new(&storage, ROOT);
        assert!(registry.list_available().unwrap().is_empty());
    }

    #[test]
    fn test_lists_directories_only() {
        let storage = MemoryStorage::new();
        storage.insert_file(format!("{ROOT}/beta/settings.json"), "{}");
        storage.create_dir_all(Path::new("/work/.claude/plugins/alpha")).unwrap();
        storage.insert_file(format!("{ROOT}/README.md"), "not a plugin");

        let registry = PluginRegistry::new(&storage, ROOT);
        let names: Vec<_> = registry.list_available().unwrap().into_iter().collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert!(registry.exists("alpha"));
        assert!(!registry.exists("README.md"));
        assert!(!registry.exists("gamma"));
    }

    #[test]
    fn test_fragments_absent_when_files_missing() {
        let storage = MemoryStorage::new();
        storage.create_dir_all(Path::new("/work/.claude/plugins/empty")).unwrap();
        let registry = PluginRegistry::new(&storage, ROOT);

        assert!(registry.settings_fragment("empty").unwrap().is_none());
        assert!(registry.doc_fragment("empty").unwrap().is_none());
        assert!(registry
            .resource_paths("empty", ResourceKind::Agents)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reads_fragments() {
        let storage = MemoryStorage::new();
        storage.insert_file(format!("{ROOT}/a/settings.json"), r#"{"x": [1]}"#);
        storage.insert_file(format!("{ROOT}/a/CLAUDE.md"), "Hello A");
        storage.insert_file(format!("{ROOT}/a/commands/review.md"), "review");
        storage.insert_file(format!("{ROOT}/a/commands/deploy.md"), "deploy");
        let registry = PluginRegistry::new(&storage, ROOT);

        assert_eq!(
            registry.settings_fragment("a").unwrap(),
            Some(json!({"x": [1]}))
        );
        assert_eq!(registry.doc_fragment("a").unwrap().as_deref(), Some("Hello A"));
        assert_eq!(
            registry.resource_paths("a", ResourceKind::Commands).unwrap(),
            vec![
                PathBuf::from(format!("{ROOT}/a/commands/deploy.md")),
                PathBuf::from(format!("{ROOT}/a/commands/review.md")),
            ]
        );
    }

    #[test]
    fn test_invalid_settings_is_an_error() {
        let storage = MemoryStorage::new();
        storage.insert_file(format!("{ROOT}/bad/settings.json"), "{ oops");
        let registry = PluginRegistry::new(&storage, ROOT);

        let err = registry.settings_fragment("bad").unwrap_err();
        assert!(matches!(err, CcManagerError::SettingsParse { .. }));
    }

    #[test]
    fn test_unreadable_doc_names_its_path() {
        let storage = MemoryStorage::new();
        storage
            .create_dir_all(Path::new("/work/.claude/plugins/odd/CLAUDE.md"))
            .unwrap();
        let registry = PluginRegistry::new(&storage, ROOT);

        let err = registry.doc_fragment("odd").unwrap_err();
        assert!(matches!(err, CcManagerError::Read { .. }));
        assert!(err.to_string().contains("/work/.claude/plugins/odd/CLAUDE.md"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("my-plugin").is_ok());
        assert!(validate_name("plugin.v2").is_ok());
        for bad in ["", ".", "..", "a/b", "..\\x"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
