use crate::error::Result;
use crate::plugins::PluginManager;
use crate::storage::Storage;

pub fn execute<S: Storage>(manager: &PluginManager<S>) -> Result<()> {
    let storage = manager.storage();
    let plugins_dir = manager.project().plugins_dir();
    if !storage.is_dir(plugins_dir) && manager.state().enabled.is_empty() {
        println!(
            "No plugins found. (Directory {} does not exist)",
            plugins_dir.display()
        );
        return Ok(());
    }

    let listings = manager.list()?;
    if listings.is_empty() {
        println!("No plugins available.");
        return Ok(());
    }

    println!("Available Plugins:");
    for listing in listings {
        println!("- {} ({})", listing.name, listing.status.as_str());
    }
    Ok(())
}
