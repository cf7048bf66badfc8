//! Persisted enablement state.

use crate::error::{CcManagerError, Result};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ordered list of enabled plugins. Order is merge precedence and document
/// order; names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginState {
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl PluginState {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|n| n == name)
    }

    /// Append `name` to the enabled list. Returns false if already present.
    pub fn enable(&mut self, name: &str) -> bool {
        if self.is_enabled(name) {
            return false;
        }
        self.enabled.push(name.to_string());
        true
    }

    /// Remove `name` from the enabled list. Returns false if absent.
    pub fn disable(&mut self, name: &str) -> bool {
        let before = self.enabled.len();
        self.enabled.retain(|n| n != name);
        self.enabled.len() != before
    }

    /// Drop repeated names, keeping the first occurrence. Returns how many
    /// entries were dropped.
    fn dedup(&mut self) -> usize {
        let before = self.enabled.len();
        let mut seen = Vec::with_capacity(before);
        self.enabled.retain(|name| {
            if seen.contains(name) {
                false
            } else {
                seen.push(name.clone());
                true
            }
        });
        before - self.enabled.len()
    }
}

pub struct StateStore<'a, S: Storage> {
    storage: &'a S,
    path: PathBuf,
}

impl<'a, S: Storage> StateStore<'a, S> {
    pub fn new(storage: &'a S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    /// Read the persisted state.
    ///
    /// A missing file is an empty state. An unreadable or corrupt file is
    /// logged and also treated as empty: the next write replaces whatever
    /// was there.
    pub fn read(&self) -> PluginState {
        if !self.storage.exists(&self.path) {
            return PluginState::default();
        }

        let parsed = self
            .storage
            .read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<PluginState>(&content).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(mut state) => {
                let dropped = state.dedup();
                if dropped > 0 {
                    tracing::warn!(
                        path = %self.path.display(),
                        dropped,
                        "state file lists duplicate plugins; keeping first occurrences"
                    );
                }
                state
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "Error reading state file, starting with empty state"
                );
                PluginState::default()
            }
        }
    }

    /// Persist `state`, creating the containing directory if needed.
    pub fn write(&self, state: &PluginState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            self.storage.create_dir_all(parent)?;
        }
        let data =
            serde_json::to_string_pretty(state).map_err(|source| CcManagerError::Serialize {
                what: "plugin state",
                source,
            })?;
        self.storage.write(&self.path, &data)?;
        Ok(())
    }
}
