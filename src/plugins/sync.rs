//! Full regeneration of the live configuration from the enabled list.

use super::document::DocumentAssembler;
use super::materialize::SymlinkMaterializer;
use super::merge::merge_all;
use super::registry::PluginRegistry;
use super::ResourceKind;
use crate::error::{CcManagerError, Result};
use crate::project::Project;
use crate::storage::Storage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Enabled plugins folded into the live configuration
    pub plugins: Vec<String>,
    /// Enabled plugins whose directory no longer exists
    pub missing: Vec<String>,
    pub links_removed: usize,
    pub links_created: usize,
    /// `(kind, file name, plugin)` for resources hidden by an earlier entry
    pub shadowed: Vec<(ResourceKind, String, String)>,
}

pub struct SyncOrchestrator<'a, S: Storage> {
    storage: &'a S,
    project: &'a Project,
}

impl<'a, S: Storage> SyncOrchestrator<'a, S> {
    pub fn new(storage: &'a S, project: &'a Project) -> Self {
        Self { storage, project }
    }

    /// Tear down every generated artifact and rebuild it from `enabled`.
    ///
    /// Steps run strictly in order: clear links, truncate the live document,
    /// fold the plugins in enablement order, then write settings and
    /// document. Not transactional: an error part way through leaves the
    /// live configuration partially rebuilt.
    pub fn run(&self, enabled: &[String]) -> Result<SyncReport> {
        tracing::info!(plugins = enabled.len(), "Syncing configuration with state");

        let registry = PluginRegistry::new(self.storage, self.project.plugins_dir());
        let materializer = SymlinkMaterializer::new(self.storage, self.project);
        let mut report = SyncReport::default();

        // 1. Clear managed links
        report.links_removed = materializer.clear()?;

        // 2. Truncate the live document
        let live_doc = self.project.live_doc();
        if self.storage.exists(&live_doc) {
            self.storage.write(&live_doc, "")?;
        }

        // 3. Fold enabled plugins in order
        let mut fragments = Vec::new();
        let mut document = DocumentAssembler::new();

        for name in enabled {
            if !registry.exists(name) {
                tracing::warn!(plugin = %name, "enabled plugin has no directory, skipping");
                report.missing.push(name.clone());
                continue;
            }
            tracing::info!(plugin = %name, "Applying plugin");

            if let Some(fragment) = registry.settings_fragment(name)? {
                fragments.push(fragment);
            }

            if let Some(fragment) = registry.doc_fragment(name)? {
                document.append(name, &fragment);
            }

            for kind in ResourceKind::ALL {
                let sources = registry.resource_paths(name, kind)?;
                let applied = materializer.apply(kind, &sources)?;
                report.links_created += applied.linked.len();
                report.shadowed.extend(
                    applied
                        .shadowed
                        .into_iter()
                        .map(|file| (kind, file, name.clone())),
                );
            }

            report.plugins.push(name.clone());
        }

        let settings = merge_all(fragments);

        // 4. Persist generated files
        self.storage.create_dir_all(self.project.claude_dir())?;
        let settings_json =
            serde_json::to_string_pretty(&settings).map_err(|source| CcManagerError::Serialize {
                what: "live settings",
                source,
            })?;
        self.storage
            .write(&self.project.live_settings(), &settings_json)?;
        self.storage.write(&live_doc, &document.finish())?;

        tracing::info!(
            plugins = report.plugins.len(),
            links = report.links_created,
            shadowed = report.shadowed.len(),
            "Sync complete"
        );
        Ok(report)
    }
}
