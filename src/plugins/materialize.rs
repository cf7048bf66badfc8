//! Projection of plugin resource files into the live resource directories.

use super::ResourceKind;
use crate::error::Result;
use crate::project::Project;
use crate::storage::{EntryKind, Storage};
use std::path::{Path, PathBuf};

/// Outcome of linking one plugin's resources of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub linked: Vec<String>,
    /// Names skipped because something already occupied the destination
    pub shadowed: Vec<String>,
}

/// Manages the symbolic links in `<claude_dir>/agents` and
/// `<claude_dir>/commands`. Only symbolic links are ever removed; regular
/// files in those directories belong to the user.
pub struct SymlinkMaterializer<'a, S: Storage> {
    storage: &'a S,
    project: &'a Project,
}

impl<'a, S: Storage> SymlinkMaterializer<'a, S> {
    pub fn new(storage: &'a S, project: &'a Project) -> Self {
        Self { storage, project }
    }

    /// Remove every symbolic link from all live resource directories.
    /// Returns the number of links removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for kind in ResourceKind::ALL {
            let dir = self.project.live_dir(kind);
            if !self.storage.is_dir(&dir) {
                continue;
            }
            for entry in self.storage.read_dir(&dir)? {
                if entry.kind == EntryKind::Symlink {
                    self.storage.remove_file(&entry.path)?;
                    removed += 1;
                }
            }
        }
        tracing::debug!(removed, "cleared managed links");
        Ok(removed)
    }

    /// Link each of `sources` into the live directory for `kind`, unless an
    /// entry with the same file name is already there.
    pub fn apply(&self, kind: ResourceKind, sources: &[PathBuf]) -> Result<ApplyReport> {
        let live_dir = self.project.live_dir(kind);
        self.storage.create_dir_all(&live_dir)?;

        let mut report = ApplyReport::default();
        for source in sources {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let name = file_name.to_string_lossy().to_string();
            let dest = live_dir.join(file_name);

            if self.storage.entry_exists(&dest) {
                tracing::debug!(
                    %kind,
                    name = %name,
                    existing = %describe(self.storage, &dest),
                    "resource shadowed by an earlier entry"
                );
                report.shadowed.push(name);
                continue;
            }

            self.storage.symlink(source, &dest)?;
            report.linked.push(name);
        }
        Ok(report)
    }
}

fn describe<S: Storage>(storage: &S, path: &Path) -> String {
    match storage.read_link(path) {
        Ok(target) => target.display().to_string(),
        Err(_) => "user file".to_string(),
    }
}
