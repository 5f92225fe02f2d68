use crate::command::{Command, Kind, DEFAULT_NAME};
use crate::error::RegistryError;
use serde::Serialize;
use tracing::debug;

/// Rules of one kind: ordered named entries plus an optional default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    default: Option<Command>,
    entries: Vec<Command>,
}

impl Partition {
    pub fn default_command(&self) -> Option<&Command> {
        self.default.as_ref()
    }

    /// Non-default entries in insertion order.
    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.entries.is_empty()
    }

    /// Addressable names: every entry, plus `default` when a default is set.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.default.as_ref().map(|_| DEFAULT_NAME))
    }

    /// First entry (insertion order) owning `classifier`, else the default.
    pub fn resolve(&self, classifier: &str) -> Option<&Command> {
        self.entries
            .iter()
            .find(|c| c.classes.contains(classifier))
            .or(self.default.as_ref())
    }

    /// Store `command` as the default (empty classes) or under its name.
    fn upsert(&mut self, command: Command) -> &Command {
        if command.is_default() {
            return self.default.insert(command);
        }
        let idx = match self.entries.iter().position(|c| c.name == command.name) {
            Some(i) => {
                self.entries[i] = command;
                i
            }
            None => {
                self.entries.push(command);
                self.entries.len() - 1
            }
        };
        &self.entries[idx]
    }

    /// Remove by name; `default` clears the default slot.
    pub fn remove(&mut self, name: &str) -> Option<Command> {
        if name == DEFAULT_NAME {
            return self.default.take();
        }
        let pos = self.entries.iter().position(|c| c.name == name)?;
        Some(self.entries.remove(pos))
    }

    /// Names containing `query` as a plain substring.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        self.names()
            .filter(|n| n.contains(query))
            .map(str::to_string)
            .collect()
    }
}

/// Input to [`Registry::add`].
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    pub name: Option<String>,
    pub executable: String,
    pub arguments: Vec<String>,
    pub classes: Vec<String>,
    pub is_default: bool,
}

/// Both partitions. Sole owner of every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    file_editors: Partition,
    url_openers: Partition,
}

impl Registry {
    pub fn partition(&self, kind: Kind) -> &Partition {
        match kind {
            Kind::FileEditor => &self.file_editors,
            Kind::UrlOpener => &self.url_openers,
        }
    }

    fn partition_mut(&mut self, kind: Kind) -> &mut Partition {
        match kind {
            Kind::FileEditor => &mut self.file_editors,
            Kind::UrlOpener => &mut self.url_openers,
        }
    }

    pub fn is_empty(&self) -> bool {
        Kind::ALL.iter().all(|k| self.partition(*k).is_empty())
    }

    /// Resolve an already-extracted, lowercase classifier.
    pub fn resolve(&self, kind: Kind, classifier: &str) -> Result<&Command, RegistryError> {
        let found = self.partition(kind).resolve(classifier);
        if let Some(c) = found {
            debug!(%kind, classifier, command = %c.name, "resolved");
        }
        found.ok_or(RegistryError::ConfigurationIncomplete { kind })
    }

    /// Default of `kind`, for inputs no classifier can be derived from.
    pub fn resolve_default(&self, kind: Kind) -> Result<&Command, RegistryError> {
        self.partition(kind)
            .default_command()
            .ok_or(RegistryError::ConfigurationIncomplete { kind })
    }

    pub fn resolve_editor(&self, extension: &str) -> Result<&Command, RegistryError> {
        self.resolve(Kind::FileEditor, extension)
    }

    pub fn resolve_opener(&self, domain: &str) -> Result<&Command, RegistryError> {
        self.resolve(Kind::UrlOpener, domain)
    }

    /// Store `command` as the default (empty classes) or under its name.
    /// A command with classes cannot be named `default`; that name addresses the default slot.
    pub fn upsert(&mut self, kind: Kind, command: Command) -> Result<&Command, RegistryError> {
        if !command.is_default() && command.name == DEFAULT_NAME {
            return Err(RegistryError::ReservedName { kind });
        }
        debug!(%kind, name = %command.name, default = command.is_default(), "upsert");
        Ok(self.partition_mut(kind).upsert(command))
    }

    /// Build a command from `spec` and upsert it. Returns the stored command.
    pub fn add(&mut self, kind: Kind, spec: CommandSpec) -> Result<&Command, RegistryError> {
        let classes = if spec.is_default { Vec::new() } else { spec.classes };
        let command = Command::new(spec.name.as_deref(), &spec.executable, spec.arguments, classes);
        self.upsert(kind, command)
    }

    pub fn remove(&mut self, kind: Kind, name: &str) -> Result<Command, RegistryError> {
        let partition = self.partition_mut(kind);
        match partition.remove(name) {
            Some(removed) => {
                debug!(%kind, name, "removed");
                Ok(removed)
            }
            None => Err(RegistryError::NotFound {
                kind,
                name: name.to_string(),
                suggestions: partition.suggestions(name),
            }),
        }
    }

    /// Upsert every default and entry of `other` into `self`.
    pub fn merge(&mut self, other: Registry) -> Result<(), RegistryError> {
        for (kind, partition) in [
            (Kind::FileEditor, other.file_editors),
            (Kind::UrlOpener, other.url_openers),
        ] {
            for command in partition.default.into_iter().chain(partition.entries) {
                self.upsert(kind, command)?;
            }
        }
        Ok(())
    }
}
