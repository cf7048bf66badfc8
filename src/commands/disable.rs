use crate::error::Result;
use crate::plugins::{PluginManager, Transition};
use crate::storage::Storage;

pub fn execute<S: Storage>(manager: &PluginManager<S>, name: &str) -> Result<()> {
    match manager.disable(name)? {
        Transition::Applied(report) => {
            super::sync::print_shadowed(&report);
            println!("Plugin \"{}\" disabled successfully.", name);
        }
        Transition::Unchanged => {
            println!("Plugin \"{}\" is not enabled.", name);
        }
    }
    Ok(())
}
