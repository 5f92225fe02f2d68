use super::{section_label, ConfigStore, EntryDoc};
use crate::command::{Command, Kind, DEFAULT_NAME};
use crate::error::{MalformedEntry, StoreError};
use crate::registry::Registry;
use serde_yaml::{Mapping, Value};
use std::io::{Read, Write};
use tracing::warn;

/// Structured encoding:
///
/// ```yaml
/// file-editors:
///   default: { name: vi, command: /usr/bin/vi, args: [] }
///   commands:
///     nano: { command: /usr/bin/nano, args: [], extensions: [md, txt] }
/// url-openers:
///   commands:
///     ytdl: { command: /usr/bin/youtube-dl, args: [], domains: [youtu.be, youtube.com] }
/// ```
pub struct StructuredStore;

fn partition_key(kind: Kind) -> &'static str {
    match kind {
        Kind::FileEditor => "file-editors",
        Kind::UrlOpener => "url-openers",
    }
}

/// Keys a partition may be stored under; the first is the one written.
fn partition_aliases(kind: Kind) -> [&'static str; 3] {
    match kind {
        Kind::FileEditor => ["file-editors", "file_editors", "file-editor"],
        Kind::UrlOpener => ["url-openers", "url_openers", "url-opener"],
    }
}

impl ConfigStore for StructuredStore {
    fn load(&self, reader: &mut dyn Read) -> Result<Registry, StoreError> {
        let doc: Value = serde_yaml::from_reader(reader)?;
        let mut registry = Registry::default();
        if doc.is_null() {
            return Ok(registry);
        }
        for kind in Kind::ALL {
            let Some(partition) = partition_aliases(kind).iter().find_map(|k| doc.get(*k)) else {
                continue;
            };
            for parsed in parse_partition(kind, partition) {
                match parsed {
                    Ok(command) => {
                        let name = command.name.clone();
                        if let Err(e) = registry.upsert(kind, command) {
                            warn!("skipping '{}': {e}", section_label(kind, &name));
                        }
                    }
                    Err(e) => warn!("skipping {e}"),
                }
            }
        }
        Ok(registry)
    }

    fn save(&self, registry: &Registry, writer: &mut dyn Write) -> Result<(), StoreError> {
        let mut doc = Mapping::new();
        for kind in Kind::ALL {
            let partition = registry.partition(kind);
            let mut out = Mapping::new();
            if let Some(default) = partition.default_command() {
                out.insert(DEFAULT_NAME.into(), entry_value(kind, default));
            }
            let mut commands = Mapping::new();
            for command in partition.entries() {
                commands.insert(command.name.as_str().into(), entry_value(kind, command));
            }
            out.insert("commands".into(), Value::Mapping(commands));
            doc.insert(partition_key(kind).into(), Value::Mapping(out));
        }
        serde_yaml::to_writer(writer, &doc)?;
        Ok(())
    }
}

/// Default first, then the `commands` mapping in document order.
fn parse_partition(kind: Kind, partition: &Value) -> Vec<Result<Command, MalformedEntry>> {
    let mut out = Vec::new();
    if partition.is_null() {
        return out;
    }
    if !partition.is_mapping() {
        out.push(Err(MalformedEntry::new(partition_key(kind), "expected a mapping")));
        return out;
    }
    if let Some(default) = partition.get(DEFAULT_NAME) {
        out.push(parse_entry(kind, None, default));
    }
    match partition.get("commands") {
        None | Some(Value::Null) => {}
        Some(Value::Mapping(commands)) => {
            for (name, entry) in commands {
                let result = match name.as_str() {
                    Some(name) => parse_entry(kind, Some(name), entry),
                    None => Err(MalformedEntry::new(
                        partition_key(kind),
                        format!("non-string command name {name:?}"),
                    )),
                };
                out.push(result);
            }
        }
        Some(_) => out.push(Err(MalformedEntry::new(
            format!("{}.commands", partition_key(kind)),
            "expected a mapping",
        ))),
    }
    out
}

fn parse_entry(kind: Kind, name: Option<&str>, value: &Value) -> Result<Command, MalformedEntry> {
    let section = section_label(kind, name.unwrap_or(DEFAULT_NAME));
    let entry: EntryDoc = serde_yaml::from_value(value.clone())
        .map_err(|e| MalformedEntry::new(section.as_str(), e.to_string()))?;
    entry.into_command(&section, name.map(str::trim))
}

fn entry_value(kind: Kind, command: &Command) -> Value {
    let mut m = Mapping::new();
    if command.is_default() {
        m.insert("name".into(), command.name.as_str().into());
    }
    m.insert("command".into(), command.executable.as_str().into());
    m.insert("args".into(), string_seq(command.arguments.iter()));
    if !command.is_default() {
        m.insert(kind.classes_key().into(), string_seq(command.classes.iter()));
    }
    Value::Mapping(m)
}

fn string_seq<'a>(items: impl Iterator<Item = &'a String>) -> Value {
    Value::Sequence(items.map(|s| Value::String(s.clone())).collect())
}
