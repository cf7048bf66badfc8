use crate::error::Result;
use crate::plugins::ResourceKind;
use crate::project::Project;
use crate::storage::Storage;
use crate::utils::path::home_dir;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Project,
    User,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Project => "Project",
            Scope::User => "User",
        }
    }
}

pub fn execute<S: Storage>(storage: &S, project: &Project, kind: ResourceKind) -> Result<()> {
    let user = user_dir(kind);
    let resources = collect(storage, &project.live_dir(kind), user.as_deref())?;

    let (empty, heading) = match kind {
        ResourceKind::Agents => ("No agents found.", "Available Agents:"),
        ResourceKind::Commands => (
            "No custom slash commands found.",
            "Available Custom Slash Commands:",
        ),
    };

    if resources.is_empty() {
        println!("{}", empty);
        return Ok(());
    }

    println!("{}", heading);
    for (name, scope) in &resources {
        println!("- {} [{}]", display_name(kind, name), scope.as_str());
    }
    Ok(())
}

/// Entries of the project and user resource directories. A project entry
/// hides a user entry with the same name.
pub fn collect<S: Storage>(
    storage: &S,
    project_dir: &Path,
    user_dir: Option<&Path>,
) -> Result<BTreeMap<String, Scope>> {
    let mut resources = BTreeMap::new();

    for (dir, scope) in [
        (Some(project_dir), Scope::Project),
        (user_dir, Scope::User),
    ] {
        let Some(dir) = dir else { continue };
        if !storage.is_dir(dir) {
            continue;
        }
        for entry in storage.read_dir(dir)? {
            resources.entry(entry.name).or_insert(scope);
        }
    }

    Ok(resources)
}

fn display_name(kind: ResourceKind, name: &str) -> String {
    match kind {
        ResourceKind::Agents => name.to_string(),
        ResourceKind::Commands => format!("/{}", name.strip_suffix(".md").unwrap_or(name)),
    }
}

/// User-level resource directory for `kind`, if a home directory is known
pub fn user_dir(kind: ResourceKind) -> Option<PathBuf> {
    home_dir().map(|home| home.join(".claude").join(kind.dir_name()))
}
