use crate::error::Result;
use crate::plugins::PluginManager;
use crate::storage::Storage;

pub fn execute<S: Storage>(manager: &PluginManager<S>, name: &str) -> Result<()> {
    manager.remove(name)?;
    println!("Plugin \"{}\" removed successfully.", name);
    Ok(())
}
