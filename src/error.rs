use crate::plugins::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcManagerError {
    #[error("Plugin \"{0}\" not found.")]
    PluginNotFound(String),

    #[error("Plugin \"{name}\" already exists at {}", path.display())]
    PluginExists { name: String, path: PathBuf },

    #[error("Cannot remove an enabled plugin. Please disable \"{0}\" first.")]
    PluginEnabled(String),

    #[error("Invalid plugin name: {0:?}")]
    InvalidPluginName(String),

    #[error("{} \"{name}\" already exists.", kind.label())]
    ResourceExists { kind: ResourceKind, name: String },

    #[error("{} \"{name}\" not found at {}", kind.label(), path.display())]
    ResourceNotFound {
        kind: ResourceKind,
        name: String,
        path: PathBuf,
    },

    #[error("{} \"{name}\" is linked from an enabled plugin. Disable the plugin instead.", kind.label())]
    ResourceLinked { kind: ResourceKind, name: String },

    #[error("Invalid {} name: {name:?}", kind.noun())]
    InvalidResourceName { kind: ResourceKind, name: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to acquire lock {}: {reason}", path.display())]
    Lock { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CcManagerError>;
