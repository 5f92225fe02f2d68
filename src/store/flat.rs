use super::{section_label, ConfigStore, EntryDoc};
use crate::command::{Command, Kind, DEFAULT_NAME};
use crate::error::{MalformedEntry, StoreError};
use crate::registry::Registry;
use std::io::{Read, Write};
use toml::{Table, Value};
use tracing::warn;

/// Flat key-grouped encoding, INI-shaped:
///
/// ```ini
/// [file-editor:nano]
/// command = /usr/bin/nano
/// args =
/// extensions = md txt
///
/// [file-editor:default]
/// name = vi
/// command = /usr/bin/vi
/// args =
/// ```
///
/// Values are bare text; one that reads as a TOML string or string array
/// (`args = ["--title", "two words"]`) is taken as such. A group whose whole
/// body is TOML, as in `["file-editor:nano"]` with quoted values, reads too.
/// Each group is read on its own, so a broken group never costs the others.
pub struct FlatStore;

impl ConfigStore for FlatStore {
    fn load(&self, reader: &mut dyn Read) -> Result<Registry, StoreError> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        let mut registry = Registry::default();
        for group in split_groups(&data) {
            let Some(header) = group.header else {
                if !group.is_blank() {
                    warn!(line = group.line, "skipping lines outside any [<kind>:<name>] group");
                }
                continue;
            };
            match group.table().and_then(|table| parse_section(header, table)) {
                Ok((kind, command)) => {
                    if let Err(e) = registry.upsert(kind, command) {
                        warn!(line = group.line, "skipping '{header}': {e}");
                    }
                }
                Err(e) => warn!(line = group.line, "skipping {e}"),
            }
        }
        Ok(registry)
    }

    fn save(&self, registry: &Registry, writer: &mut dyn Write) -> Result<(), StoreError> {
        let mut first = true;
        for kind in Kind::ALL {
            let partition = registry.partition(kind);
            let groups = partition
                .default_command()
                .map(|d| (DEFAULT_NAME, d))
                .into_iter()
                .chain(partition.entries().iter().map(|c| (c.name.as_str(), c)));
            for (name, command) in groups {
                if !first {
                    writeln!(writer)?;
                }
                first = false;
                writeln!(writer, "[{}]", section_label(kind, name))?;
                for (key, value) in group_lines(kind, command) {
                    if value.is_empty() {
                        writeln!(writer, "{key} =")?;
                    } else {
                        writeln!(writer, "{key} = {value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// One `[header]` and the lines below it, up to the next header.
struct Group<'a> {
    /// `None` for the lines ahead of the first header.
    header: Option<&'a str>,
    line: usize,
    body: Vec<&'a str>,
}

impl Group<'_> {
    fn is_blank(&self) -> bool {
        self.body.iter().all(|l| is_comment_or_blank(l))
    }

    fn table(&self) -> Result<Table, MalformedEntry> {
        let section = self.header.unwrap_or_default();
        if let Ok(table) = self.body.join("\n").parse::<Table>() {
            return Ok(table.into_iter().map(|(k, v)| (k, stringify(v))).collect());
        }
        ini_table(section, &self.body)
    }
}

fn split_groups(data: &str) -> Vec<Group<'_>> {
    let mut groups = vec![Group {
        header: None,
        line: 1,
        body: Vec::new(),
    }];
    for (i, line) in data.lines().enumerate() {
        match group_header(line) {
            Some(header) => groups.push(Group {
                header: Some(header),
                line: i + 1,
                body: Vec::new(),
            }),
            None => {
                if let Some(group) = groups.last_mut() {
                    group.body.push(line);
                }
            }
        }
    }
    groups
}

/// `[editor:nano]` or `["file-editor:nano"]`.
fn group_header(line: &str) -> Option<&str> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?.trim();
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|q| inner.strip_prefix(q)?.strip_suffix(q));
    Some(unquoted.unwrap_or(inner))
}

fn is_comment_or_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(['#', ';'])
}

/// `key = value` or `key: value` lines. Indented lines continue the previous value.
fn ini_table(section: &str, lines: &[&str]) -> Result<Table, MalformedEntry> {
    let mut raw: Vec<(String, String)> = Vec::new();
    for line in lines {
        if is_comment_or_blank(line) {
            continue;
        }
        let text = line.trim();
        if line.starts_with(char::is_whitespace) {
            if let Some((_, value)) = raw.last_mut() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(text);
                continue;
            }
        }
        let Some((key, value)) = text.split_once(['=', ':']) else {
            return Err(MalformedEntry::new(section, format!("expected key = value, got {text:?}")));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(MalformedEntry::new(section, format!("missing key in {text:?}")));
        }
        raw.push((key.to_ascii_lowercase(), value.trim().to_string()));
    }
    Ok(raw.into_iter().map(|(k, v)| (k, ini_value(&v))).collect())
}

/// A value that reads as a TOML string or string array keeps that reading;
/// anything else is the raw text.
fn ini_value(raw: &str) -> Value {
    match toml_value(raw) {
        Some(v @ Value::String(_)) => v,
        Some(Value::Array(items)) if items.iter().all(Value::is_str) => Value::Array(items),
        _ => Value::String(raw.to_string()),
    }
}

fn toml_value(text: &str) -> Option<Value> {
    format!("v = {text}").parse::<Table>().ok()?.remove("v")
}

/// Scalars in a TOML body (`extensions = 7`) are read as their text.
fn stringify(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        Value::Array(items) => Value::Array(items.into_iter().map(stringify).collect()),
        other => Value::String(other.to_string()),
    }
}

fn parse_section(section: &str, table: Table) -> Result<(Kind, Command), MalformedEntry> {
    let Some((kind, name)) = section.split_once(':') else {
        return Err(MalformedEntry::new(section, "expected <kind>:<name>"));
    };
    let kind: Kind = kind.parse().map_err(|e: String| MalformedEntry::new(section, e))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(MalformedEntry::new(section, "empty name"));
    }
    let entry: EntryDoc = Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| MalformedEntry::new(section, e.to_string().trim()))?;
    let slot = (name != DEFAULT_NAME).then_some(name);
    Ok((kind, entry.into_command(section, slot)?))
}

fn group_lines(kind: Kind, command: &Command) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();
    if command.is_default() {
        lines.push(("name", scalar(&command.name)));
    }
    lines.push(("command", scalar(&command.executable)));
    lines.push(("args", tokens(command.arguments.iter().map(String::as_str))));
    if !command.is_default() {
        lines.push((kind.classes_key(), tokens(command.classes.iter().map(String::as_str))));
    }
    lines
}

/// Bare when the text cannot be mistaken for TOML, otherwise a quoted TOML string.
fn scalar(text: &str) -> String {
    let bare = !text.is_empty()
        && text.trim() == text
        && !text.contains(['\n', '\r'])
        && toml_value(text).is_none();
    if bare {
        text.to_string()
    } else {
        Value::String(text.to_string()).to_string()
    }
}

/// Space-joined, or a TOML array when a token would not survive splitting.
fn tokens<'a>(items: impl Iterator<Item = &'a str> + Clone) -> String {
    if items.clone().any(|t| t.is_empty() || t.contains(char::is_whitespace)) {
        return Value::Array(items.map(|t| Value::String(t.to_string())).collect()).to_string();
    }
    let line = items.collect::<Vec<_>>().join(" ");
    if line.is_empty() {
        line
    } else {
        scalar(&line)
    }
}
