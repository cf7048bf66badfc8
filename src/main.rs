#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cc_manager::cli::{Cli, Commands, ListCommands, ResourceAction};
use cc_manager::commands;
use cc_manager::config::Config;
use cc_manager::plugins::{PluginManager, ResourceKind};
use cc_manager::project::Project;
use cc_manager::storage::FsStorage;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let root = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = Config::load(&root)?.with_cli_overrides(&cli);
    let project = Project::detect(&root, &config);
    tracing::debug!(
        root = %project.root().display(),
        claude_dir = %project.claude_dir().display(),
        "resolved project"
    );

    let manager = PluginManager::new(FsStorage::new(), project).with_lock(config.lock_enabled());

    match &cli.command {
        Commands::List { what } => match what.unwrap_or(ListCommands::Plugins) {
            ListCommands::Plugins => commands::list::execute(&manager)?,
            ListCommands::Agents => commands::resources::execute(
                manager.storage(),
                manager.project(),
                ResourceKind::Agents,
            )?,
            ListCommands::Commands => commands::resources::execute(
                manager.storage(),
                manager.project(),
                ResourceKind::Commands,
            )?,
        },
        Commands::Add { name } => commands::add::execute(&manager, name)?,
        Commands::Enable { name } => commands::enable::execute(&manager, name)?,
        Commands::Disable { name } => commands::disable::execute(&manager, name)?,
        Commands::Remove { name } => commands::remove::execute(&manager, name)?,
        Commands::Sync => commands::sync::execute(&manager)?,
        Commands::Agent { action } => resource_action(&manager, ResourceKind::Agents, action)?,
        Commands::Command { action } => {
            resource_action(&manager, ResourceKind::Commands, action)?
        }
    }

    Ok(())
}

fn resource_action(
    manager: &PluginManager<FsStorage>,
    kind: ResourceKind,
    action: &ResourceAction,
) -> Result<()> {
    match action {
        ResourceAction::Add { name, prompt } => {
            commands::resource_files::add(manager, kind, name, prompt.as_deref())?
        }
        ResourceAction::Remove { name } => commands::resource_files::remove(manager, kind, name)?,
    }
    Ok(())
}

/// Log to stderr so command output on stdout stays clean.
/// `CC_MANAGER_LOG` takes a full filter directive and wins over `-v`.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env("CC_MANAGER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to set global default subscriber")
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "cc_manager=debug"
    } else {
        "cc_manager=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directive() {
        assert_eq!(default_directive(false), "cc_manager=info");
        assert_eq!(default_directive(true), "cc_manager=debug");
    }
}
