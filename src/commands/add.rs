use crate::error::Result;
use crate::plugins::PluginManager;
use crate::storage::Storage;

pub fn execute<S: Storage>(manager: &PluginManager<S>, name: &str) -> Result<()> {
    let dir = manager.add(name)?;
    println!("Plugin \"{}\" created at {}", name, dir.display());
    println!("Enable it with: cc-manager enable {}", name);
    Ok(())
}
