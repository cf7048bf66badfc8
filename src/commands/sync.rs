use crate::error::Result;
use crate::plugins::{PluginManager, SyncReport};
use crate::storage::Storage;

pub fn execute<S: Storage>(manager: &PluginManager<S>) -> Result<()> {
    let report = manager.sync()?;
    print_shadowed(&report);
    for name in &report.missing {
        println!("Warning: enabled plugin \"{}\" has no directory", name);
    }
    println!(
        "Synced {} plugin(s), {} link(s) created.",
        report.plugins.len(),
        report.links_created
    );
    Ok(())
}

/// Tell the user about resources hidden by an earlier plugin or a user file
pub(crate) fn print_shadowed(report: &SyncReport) {
    for (kind, file, plugin) in &report.shadowed {
        println!(
            "Note: {}/{} from plugin \"{}\" is shadowed by an existing entry",
            kind, file, plugin
        );
    }
}
