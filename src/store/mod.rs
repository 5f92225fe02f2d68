//! Persistence of the [`Registry`].
//!
//! Two encodings share the [`ConfigStore`] contract:
//! - [`FlatStore`]: INI-style `[<kind>:<name>]` groups of `key = value` lines
//! - [`StructuredStore`]: YAML with one mapping per partition
//!
//! Both are lenient: an entry or group that cannot be read is logged and skipped.

mod flat;
mod structured;

pub use flat::FlatStore;
pub use structured::StructuredStore;

use crate::command::{derive_name, Command, Kind, DEFAULT_NAME};
use crate::error::{MalformedEntry, StoreError};
use crate::registry::Registry;
use fs_err as fs;
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait ConfigStore {
    fn load(&self, reader: &mut dyn Read) -> Result<Registry, StoreError>;
    fn save(&self, registry: &Registry, writer: &mut dyn Write) -> Result<(), StoreError>;
}

/// On-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// INI-style, one `[<kind>:<name>]` group per command
    #[value(alias = "ini", alias = "toml")]
    Flat,
    /// YAML, nested per partition
    #[value(alias = "yaml", alias = "yml")]
    Structured,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(Format::Structured),
            "ini" | "cfg" | "toml" => Some(Format::Flat),
            _ => None,
        }
    }

    pub fn store(self) -> Box<dyn ConfigStore> {
        match self {
            Format::Flat => Box::new(FlatStore),
            Format::Structured => Box::new(StructuredStore),
        }
    }
}

/// A config file location bound to the encoding used to read and write it.
pub struct ConfigFile {
    path: PathBuf,
    format: Format,
}

impl ConfigFile {
    /// `format` overrides detection from the file extension.
    pub fn new(path: impl Into<PathBuf>, format: Option<Format>) -> Result<Self, StoreError> {
        let path = path.into();
        let format = match format.or_else(|| Format::from_path(&path)) {
            Some(f) => f,
            None => return Err(StoreError::UnknownFormat { path }),
        };
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read the registry. A missing file yields an empty registry.
    pub fn load(&self) -> Result<Registry, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "config file missing; starting empty");
            return Ok(Registry::default());
        }
        let mut file = fs::File::open(&self.path)?;
        let registry = self.format.store().load(&mut file)?;
        debug!(path = %self.path.display(), format = ?self.format, "config loaded");
        Ok(registry)
    }

    /// Serialize fully before touching the file, then write it (creating parent dirs).
    pub fn save(&self, registry: &Registry) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        self.format.store().save(registry, &mut buf)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, buf)?;
        debug!(path = %self.path.display(), format = ?self.format, "config saved");
        Ok(())
    }
}

/// Load `path`, picking the encoding from its extension.
pub fn load_config(path: &Path) -> Result<Registry, StoreError> {
    ConfigFile::new(path, None)?.load()
}

/// Save to `path`, picking the encoding from its extension.
pub fn save_config(registry: &Registry, path: &Path) -> Result<(), StoreError> {
    ConfigFile::new(path, None)?.save(registry)
}

/// Either a list of tokens or one whitespace-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tokens {
    List(Vec<String>),
    Line(String),
}

impl Tokens {
    fn into_vec(self) -> Vec<String> {
        match self {
            Tokens::List(v) => v,
            Tokens::Line(s) => s.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// Persisted shape of one command, shared by both encodings.
#[derive(Debug, Deserialize)]
struct EntryDoc {
    #[serde(default)]
    name: Option<String>,
    command: String,
    #[serde(default, alias = "command_args")]
    args: Option<Tokens>,
    #[serde(default, alias = "extensions", alias = "domains")]
    classes: Option<Tokens>,
}

impl EntryDoc {
    /// Turn a persisted entry into a command. `name` is `None` for the default slot.
    fn into_command(self, section: &str, name: Option<&str>) -> Result<Command, MalformedEntry> {
        if self.command.trim().is_empty() {
            return Err(MalformedEntry::new(section, "empty command"));
        }
        let args = self.args.map(Tokens::into_vec).unwrap_or_default();
        match name {
            None => {
                let name = self.name.unwrap_or_else(|| derive_name(&self.command));
                Ok(Command::new(Some(&name), &self.command, args, Vec::<String>::new()))
            }
            Some(DEFAULT_NAME) => Err(MalformedEntry::new(section, "reserved name")),
            Some(name) => {
                let classes = self.classes.map(Tokens::into_vec).unwrap_or_default();
                let command = Command::new(Some(name), &self.command, args, classes);
                if command.is_default() {
                    return Err(MalformedEntry::new(section, "no classifiers"));
                }
                Ok(command)
            }
        }
    }
}

/// Section label used in log messages, e.g. `url-opener:ytdl`.
fn section_label(kind: Kind, name: &str) -> String {
    format!("{kind}:{name}")
}
