//! Plugin synchronization engine.
//!
//! A plugin is a directory bundle under the plugins root:
//!
//! ```text
//! .claude/plugins/<name>/
//!   settings.json   merged into .claude/settings.json
//!   CLAUDE.md       appended to .claude/CLAUDE.md inside marker comments
//!   agents/*        linked into .claude/agents/
//!   commands/*      linked into .claude/commands/
//! ```
//!
//! Every file is optional. The ordered list of enabled plugins is persisted
//! by [`StateStore`]; after each enable or disable the live configuration is
//! rebuilt from scratch by [`SyncOrchestrator`], so disabled plugins never
//! leave residue behind.

pub mod document;
pub mod manager;
pub mod materialize;
pub mod merge;
pub mod registry;
pub mod resource_files;
pub mod state;
pub mod sync;

pub use document::DocumentAssembler;
pub use manager::{PluginListing, PluginManager, PluginStatus, Transition};
pub use materialize::{ApplyReport, SymlinkMaterializer};
pub use merge::{merge, merge_all};
pub use registry::PluginRegistry;
pub use resource_files::ResourceFiles;
pub use state::{PluginState, StateStore};
pub use sync::{SyncOrchestrator, SyncReport};

use std::fmt;

/// File-based resource categories a plugin can ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Agents,
    Commands,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Agents, ResourceKind::Commands];

    /// Directory name, both inside a plugin and inside the live config dir
    pub fn dir_name(self) -> &'static str {
        match self {
            ResourceKind::Agents => "agents",
            ResourceKind::Commands => "commands",
        }
    }

    /// Singular, capitalized name used in messages
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Agents => "Agent",
            ResourceKind::Commands => "Command",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Agents => "agent",
            ResourceKind::Commands => "command",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
