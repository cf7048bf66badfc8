//! Plugin lifecycle: add, enable, disable, remove.
//!
//! ```text
//! Absent --add--> Available --enable--> Enabled
//!                     ^                    |
//!                     +------disable-------+
//! Available --remove--> Removed
//! ```
//!
//! Enable and disable write the new state first and then regenerate the
//! live configuration. Add and remove never touch the live configuration.

use super::registry::{validate_name, PluginRegistry};
use super::resource_files::ResourceFiles;
use super::state::{PluginState, StateStore};
use super::sync::{SyncOrchestrator, SyncReport};
use crate::error::{CcManagerError, Result};
use crate::project::{Project, DOC_FILE, SETTINGS_FILE};
use crate::storage::Storage;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    Enabled,
    Available,
    /// Listed in state but its directory is gone
    Missing,
}

impl PluginStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginStatus::Enabled => "enabled",
            PluginStatus::Available => "available",
            PluginStatus::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginListing {
    pub name: String,
    pub status: PluginStatus,
}

/// Result of an enable or disable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State changed and the live configuration was regenerated
    Applied(SyncReport),
    /// Already in the requested state; nothing was written
    Unchanged,
}

pub struct PluginManager<S: Storage> {
    storage: S,
    project: Project,
    lock: bool,
}

impl<S: Storage> PluginManager<S> {
    pub fn new(storage: S, project: Project) -> Self {
        Self {
            storage,
            project,
            lock: true,
        }
    }

    /// Toggle the exclusive lock around state changes
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn registry(&self) -> PluginRegistry<'_, S> {
        PluginRegistry::new(&self.storage, self.project.plugins_dir())
    }

    fn state_store(&self) -> StateStore<'_, S> {
        StateStore::new(&self.storage, self.project.state_file())
    }

    pub fn state(&self) -> PluginState {
        self.state_store().read()
    }

    /// User-authored agents and commands in the live directories
    pub fn resource_files(&self) -> ResourceFiles<'_, S> {
        ResourceFiles::new(&self.storage, &self.project)
    }

    fn require_plugin(&self, name: &str) -> Result<()> {
        if !self.registry().exists(name) {
            return Err(CcManagerError::PluginNotFound(name.to_string()));
        }
        Ok(())
    }

    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if self.lock {
            self.storage
                .with_exclusive_lock(&self.project.lock_file(), f)
        } else {
            f()
        }
    }

    /// Available plugins with their status, followed by enabled plugins
    /// whose directory has disappeared.
    pub fn list(&self) -> Result<Vec<PluginListing>> {
        let state = self.state();
        let available = self.registry().list_available()?;

        let mut listings: Vec<PluginListing> = available
            .iter()
            .map(|name| PluginListing {
                name: name.clone(),
                status: if state.is_enabled(name) {
                    PluginStatus::Enabled
                } else {
                    PluginStatus::Available
                },
            })
            .collect();

        listings.extend(
            state
                .enabled
                .iter()
                .filter(|name| !available.contains(*name))
                .map(|name| PluginListing {
                    name: name.clone(),
                    status: PluginStatus::Missing,
                }),
        );
        Ok(listings)
    }

    /// Scaffold a new plugin directory. Returns its path.
    pub fn add(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        let registry = self.registry();
        let dir = registry.plugin_dir(name);
        if self.storage.entry_exists(&dir) {
            return Err(CcManagerError::PluginExists {
                name: name.to_string(),
                path: dir,
            });
        }

        tracing::info!(plugin = %name, path = %dir.display(), "Creating plugin");
        self.storage.create_dir_all(&dir)?;
        self.storage.create_dir_all(&dir.join("agents"))?;
        self.storage.create_dir_all(&dir.join("commands"))?;
        self.storage.write(&dir.join(SETTINGS_FILE), "{}")?;
        self.storage.write(
            &dir.join(DOC_FILE),
            &format!("# {}\n\nThis plugin is for...\n", name),
        )?;
        Ok(dir)
    }

    /// Append `name` to the enabled list and regenerate.
    pub fn enable(&self, name: &str) -> Result<Transition> {
        validate_name(name)?;
        self.require_plugin(name)?;
        self.locked(|| {
            // The directory may have gone while waiting for the lock
            self.require_plugin(name)?;

            let store = self.state_store();
            let mut state = store.read();
            if !state.enable(name) {
                tracing::info!(plugin = %name, "Plugin is already enabled");
                return Ok(Transition::Unchanged);
            }

            store.write(&state)?;
            let report = SyncOrchestrator::new(&self.storage, &self.project).run(&state.enabled)?;
            Ok(Transition::Applied(report))
        })
    }

    /// Remove `name` from the enabled list and regenerate. Works even when
    /// the plugin directory is already gone, and for any name already in
    /// state.
    pub fn disable(&self, name: &str) -> Result<Transition> {
        if !self.state().is_enabled(name) {
            validate_name(name)?;
        }
        self.locked(|| {
            if !self.registry().exists(name) {
                tracing::warn!(plugin = %name, "Plugin not found, removing it from state anyway");
            }

            let store = self.state_store();
            let mut state = store.read();
            if !state.disable(name) {
                tracing::info!(plugin = %name, "Plugin is not enabled");
                return Ok(Transition::Unchanged);
            }

            store.write(&state)?;
            let report = SyncOrchestrator::new(&self.storage, &self.project).run(&state.enabled)?;
            Ok(Transition::Applied(report))
        })
    }

    /// Delete a disabled plugin's directory.
    pub fn remove(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        self.require_plugin(name)?;
        self.locked(|| {
            let registry = self.registry();
            self.require_plugin(name)?;
            if self.state().is_enabled(name) {
                return Err(CcManagerError::PluginEnabled(name.to_string()));
            }

            let dir = registry.plugin_dir(name);
            tracing::info!(plugin = %name, path = %dir.display(), "Removing plugin");
            self.storage.remove_dir_all(&dir)?;
            Ok(dir)
        })
    }

    /// Regenerate the live configuration from the current state
    pub fn sync(&self) -> Result<SyncReport> {
        self.locked(|| {
            let state = self.state();
            SyncOrchestrator::new(&self.storage, &self.project).run(&state.enabled)
        })
    }
}
