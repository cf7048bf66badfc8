use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cc-manager")]
#[command(about = "Manage Claude Code configuration through composable plugins", long_about = None)]
#[command(version)]
#[command(after_help = "\
PLUGIN LAYOUT:
  .claude/plugins/<name>/settings.json   merged into .claude/settings.json
  .claude/plugins/<name>/CLAUDE.md       appended to .claude/CLAUDE.md
  .claude/plugins/<name>/agents/*        linked into .claude/agents/
  .claude/plugins/<name>/commands/*      linked into .claude/commands/

EXAMPLES:
  cc-manager add review-tools        Scaffold a new plugin
  cc-manager enable review-tools     Enable it and regenerate the live config
  cc-manager list                    Show plugins and their status
  cc-manager list commands           Show available slash commands
  cc-manager command add review      Create .claude/commands/review.md")]
pub struct Cli {
    /// Show debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long = "project-dir", global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Claude configuration directory, relative to the project root
    #[arg(long = "claude-dir", global = true, value_name = "DIR")]
    pub claude_dir: Option<PathBuf>,

    /// Do not take the lock file while changing state
    #[arg(long = "no-lock", global = true)]
    pub no_lock: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List plugins, or the live agents or commands
    List {
        #[command(subcommand)]
        what: Option<ListCommands>,
    },

    /// Create a new, disabled plugin
    Add {
        /// Plugin name (its directory name)
        name: String,
    },

    /// Enable a plugin and regenerate the live configuration
    Enable {
        /// Plugin name
        name: String,
    },

    /// Disable a plugin and regenerate the live configuration
    Disable {
        /// Plugin name
        name: String,
    },

    /// Delete a disabled plugin
    #[command(alias = "rm")]
    Remove {
        /// Plugin name
        name: String,
    },

    /// Regenerate the live configuration from the enabled plugins
    Sync,

    /// Create or delete your own agents in the live agents directory
    Agent {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Create or delete your own slash commands in the live commands directory
    Command {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResourceAction {
    /// Create a markdown file with a description header
    Add {
        /// File name, `.md` is added when missing
        name: String,

        /// Body text (defaults to a placeholder)
        #[arg(short = 'p', long = "prompt")]
        prompt: Option<String>,
    },

    /// Delete a file you created
    #[command(alias = "rm")]
    Remove {
        /// File name, `.md` is added when missing
        name: String,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommands {
    /// List plugins and whether they are enabled (default)
    Plugins,

    /// List agents available to Claude Code
    Agents,

    /// List custom slash commands available to Claude Code
    Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enable() {
        let cli = Cli::parse_from(["cc-manager", "enable", "foo"]);
        assert!(matches!(cli.command, Commands::Enable { ref name } if name == "foo"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_list_variants() {
        let cli = Cli::parse_from(["cc-manager", "list"]);
        assert!(matches!(cli.command, Commands::List { what: None }));

        let cli = Cli::parse_from(["cc-manager", "list", "commands"]);
        assert!(matches!(
            cli.command,
            Commands::List {
                what: Some(ListCommands::Commands)
            }
        ));
    }

    #[test]
    fn test_remove_alias() {
        let cli = Cli::parse_from(["cc-manager", "rm", "foo"]);
        assert!(matches!(cli.command, Commands::Remove { ref name } if name == "foo"));
    }

    #[test]
    fn test_parse_resource_actions() {
        let cli = Cli::parse_from(["cc-manager", "agent", "add", "helper", "-p", "Be brief."]);
        match cli.command {
            Commands::Agent {
                action: ResourceAction::Add { name, prompt },
            } => {
                assert_eq!(name, "helper");
                assert_eq!(prompt.as_deref(), Some("Be brief."));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["cc-manager", "command", "rm", "review"]);
        assert!(matches!(
            cli.command,
            Commands::Command {
                action: ResourceAction::Remove { ref name }
            } if name == "review"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cc-manager", "sync", "--project-dir", "/tmp/p", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/p")));
    }
}
