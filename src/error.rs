use crate::command::Kind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no {kind} rule matches and no default {kind} is configured")]
    ConfigurationIncomplete { kind: Kind },
    #[error("{kind} '{name}' not found")]
    NotFound {
        kind: Kind,
        name: String,
        /// Existing names containing `name` as a substring
        suggestions: Vec<String>,
    },
    #[error("'default' is reserved for the fallback {kind}; pass --default instead")]
    ReservedName { kind: Kind },
}

/// A persisted entry that could not be turned into a command. Skipped on load.
#[derive(Debug, Error)]
#[error("malformed entry '{section}': {reason}")]
pub struct MalformedEntry {
    pub section: String,
    pub reason: String,
}

impl MalformedEntry {
    pub fn new(section: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("structured config: {0}")]
    Structured(#[from] serde_yaml::Error),
    #[error("cannot tell config format of {path:?} (use .yml/.yaml, .ini/.cfg or .toml, or pass --format)")]
    UnknownFormat { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("'{program}' not found. Please check for typos or installation.")]
    ExecutableMissing { program: String },
    #[error("launching '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
