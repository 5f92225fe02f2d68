use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Name that addresses a partition's default slot.
pub const DEFAULT_NAME: &str = "default";

/// The two rule partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    /// Rules keyed by file extension
    #[value(alias = "editor")]
    FileEditor,
    /// Rules keyed by URL domain
    #[value(alias = "opener")]
    UrlOpener,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::FileEditor, Kind::UrlOpener];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::FileEditor => "file-editor",
            Kind::UrlOpener => "url-opener",
        }
    }

    /// Key under which classifiers are persisted ("extensions" or "domains").
    pub fn classes_key(&self) -> &'static str {
        match self {
            Kind::FileEditor => "extensions",
            Kind::UrlOpener => "domains",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file-editor" | "file-editors" | "file_editors" | "editor" => Ok(Kind::FileEditor),
            "url-opener" | "url-openers" | "url_openers" | "opener" => Ok(Kind::UrlOpener),
            other => Err(format!("unknown rule kind '{other}'")),
        }
    }
}

/// A named program invocation plus the classifiers it handles.
///
/// An empty `classes` set marks the partition default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub executable: String,
    pub arguments: Vec<String>,
    pub classes: BTreeSet<String>,
}

impl Command {
    /// Build a command, deriving the name from the executable's base name when
    /// `name` is absent or blank. Classifiers are normalized (see [`normalize_class`]).
    pub fn new<I, S>(name: Option<&str>, executable: &str, arguments: Vec<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => derive_name(executable),
        };
        Self {
            name,
            executable: executable.to_string(),
            arguments,
            classes: classes.into_iter().filter_map(|c| normalize_class(c.as_ref())).collect(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.classes.is_empty()
    }

    /// Full argv for running this command against `input`.
    pub fn invocation(&self, input: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.arguments.len() + 2);
        argv.push(self.executable.clone());
        argv.extend(self.arguments.iter().cloned());
        argv.push(input.to_string());
        argv
    }
}

/// Base name of an executable path, e.g. `/usr/bin/youtube-dl` -> `youtube-dl`.
pub fn derive_name(executable: &str) -> String {
    Path::new(executable)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| executable.to_string())
}

/// Lowercase, drop a leading dot and surrounding whitespace. Blank input yields `None`.
pub fn normalize_class(raw: &str) -> Option<String> {
    let c = raw.trim().trim_start_matches('.').to_lowercase();
    if c.is_empty() {
        None
    } else {
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_executable_basename() {
        let c = Command::new(None, "/usr/bin/youtube-dl", vec![], ["youtube.com"]);
        assert_eq!(c.name, "youtube-dl");
        let c = Command::new(Some("  "), "nano", vec![], ["txt"]);
        assert_eq!(c.name, "nano");
        let c = Command::new(Some("radare"), "/usr/bin/r2", vec![], ["exe"]);
        assert_eq!(c.name, "radare");
    }

    #[test]
    fn classes_are_normalized() {
        let c = Command::new(None, "nano", vec![], [".TXT", "md", "", "  Md "]);
        let expected: BTreeSet<String> = ["txt", "md"].iter().map(|s| s.to_string()).collect();
        assert_eq!(c.classes, expected);
        assert!(!c.is_default());
        assert!(Command::new(None, "vi", vec![], Vec::<String>::new()).is_default());
    }

    #[test]
    fn invocation_puts_input_last() {
        let c = Command::new(None, "mpv", vec!["--fs".into(), "--mute".into()], ["mp4"]);
        assert_eq!(c.invocation("a.mp4"), vec!["mpv", "--fs", "--mute", "a.mp4"]);
    }

    #[test]
    fn kind_accepts_short_and_plural_forms() {
        assert_eq!("editor".parse::<Kind>().unwrap(), Kind::FileEditor);
        assert_eq!("file-editors".parse::<Kind>().unwrap(), Kind::FileEditor);
        assert_eq!("Opener".parse::<Kind>().unwrap(), Kind::UrlOpener);
        assert_eq!("url_openers".parse::<Kind>().unwrap(), Kind::UrlOpener);
        assert!("viewer".parse::<Kind>().is_err());
    }
}
