use crate::error::Result;
use crate::plugins::{PluginManager, ResourceKind};
use crate::storage::Storage;

pub fn add<S: Storage>(
    manager: &PluginManager<S>,
    kind: ResourceKind,
    name: &str,
    prompt: Option<&str>,
) -> Result<()> {
    let path = manager.resource_files().add(kind, name, prompt)?;
    println!("Created {}: {}", kind.noun(), path.display());
    Ok(())
}

pub fn remove<S: Storage>(manager: &PluginManager<S>, kind: ResourceKind, name: &str) -> Result<()> {
    let path = manager.resource_files().remove(kind, name)?;
    println!("Removed {}: {}", kind.noun(), path.display());
    Ok(())
}
