//! User-authored agents and slash commands.
//!
//! These live as regular `.md` files directly in `.claude/agents/` and
//! `.claude/commands/`, next to the links created by sync. Sync never
//! removes regular files, so they survive every enable and disable.

use super::registry::is_valid_name;
use super::ResourceKind;
use crate::error::{CcManagerError, Result};
use crate::project::Project;
use crate::storage::Storage;
use std::path::PathBuf;

pub struct ResourceFiles<'a, S: Storage> {
    storage: &'a S,
    project: &'a Project,
}

impl<'a, S: Storage> ResourceFiles<'a, S> {
    pub fn new(storage: &'a S, project: &'a Project) -> Self {
        Self { storage, project }
    }

    /// Location of the file for `name`, adding `.md` when missing
    pub fn path(&self, kind: ResourceKind, name: &str) -> Result<PathBuf> {
        if !is_valid_name(name) {
            return Err(CcManagerError::InvalidResourceName {
                kind,
                name: name.to_string(),
            });
        }
        Ok(self.project.live_dir(kind).join(file_name(name)))
    }

    /// Create a new file with a `description:` front matter header.
    pub fn add(&self, kind: ResourceKind, name: &str, prompt: Option<&str>) -> Result<PathBuf> {
        let path = self.path(kind, name)?;
        if self.storage.entry_exists(&path) {
            return Err(CcManagerError::ResourceExists {
                kind,
                name: name.to_string(),
            });
        }

        self.storage.create_dir_all(&self.project.live_dir(kind))?;
        self.storage.write(&path, &scaffold(kind, name, prompt))?;
        tracing::info!(%kind, path = %path.display(), "Created resource file");
        Ok(path)
    }

    /// Delete a user-authored file. Links managed by sync are refused.
    pub fn remove(&self, kind: ResourceKind, name: &str) -> Result<PathBuf> {
        let path = self.path(kind, name)?;
        if self.storage.is_symlink(&path) {
            return Err(CcManagerError::ResourceLinked {
                kind,
                name: name.to_string(),
            });
        }
        if !self.storage.exists(&path) {
            return Err(CcManagerError::ResourceNotFound {
                kind,
                name: name.to_string(),
                path,
            });
        }

        self.storage.remove_file(&path)?;
        tracing::info!(%kind, path = %path.display(), "Removed resource file");
        Ok(path)
    }
}

fn file_name(name: &str) -> String {
    if name.ends_with(".md") {
        name.to_string()
    } else {
        format!("{}.md", name)
    }
}

/// Initial contents for a new agent or command
pub fn scaffold(kind: ResourceKind, name: &str, prompt: Option<&str>) -> String {
    let noun = kind.noun();
    let description = name
        .strip_suffix(".md")
        .unwrap_or(name)
        .replacen('-', " ", 1);
    let prompt = match prompt {
        Some(prompt) => prompt.to_string(),
        None => format!("This is a custom {} for {}.", noun, description),
    };
    format!(
        "---\ndescription: A custom {} for {}\n---\n\n{}\n",
        noun, description, prompt
    )
}
