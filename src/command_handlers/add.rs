use crate::command::Kind;
use crate::registry::CommandSpec;
use crate::store::ConfigFile;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

pub struct AddArgs<'a> {
    pub kind: Kind,
    pub script: &'a str,
    pub cases: Vec<String>,
    pub name: Option<String>,
    pub default: bool,
    pub args: Vec<String>,
}

pub fn add_script(cfg: &ConfigFile, args: AddArgs) -> Result<()> {
    println!("Evaluating script: {}", args.script);
    let script_path = resolve_script(args.script)?;
    println!("Absolute path found for script: {}", script_path.display());
    if args.default && (args.name.is_some() || !args.cases.is_empty()) {
        eprintln!("Note: --default ignores --name and CASES");
    }

    let mut registry = cfg.load()?;
    let spec = CommandSpec {
        name: if args.default { None } else { args.name },
        executable: script_path.to_string_lossy().into_owned(),
        arguments: args.args,
        classes: args.cases,
        is_default: args.default,
    };
    let stored = registry.add(args.kind, spec)?;
    let summary = if stored.is_default() {
        format!("Set default {} to {}", args.kind, stored.name)
    } else {
        let classes: Vec<&str> = stored.classes.iter().map(String::as_str).collect();
        format!("Saved {} '{}' for {}", args.kind, stored.name, classes.join(" "))
    };
    cfg.save(&registry)
        .with_context(|| format!("writing {}", cfg.path().display()))?;
    println!("{summary}");
    Ok(())
}

/// Absolute path of `script`, looked up on PATH unless it already names a file.
fn resolve_script(script: &str) -> Result<PathBuf> {
    let found = which::which(script)
        .with_context(|| format!("given script '{script}' not found or not executable"))?;
    debug!(script, found = %found.display(), "script resolved");
    std::path::absolute(&found).with_context(|| format!("making {} absolute", found.display()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn executable(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn add_resolves_script_and_persists() {
        let dir = TempDir::new().unwrap();
        let script = executable(&dir, "ytdl-wrapper");
        let cfg = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        add_script(
            &cfg,
            AddArgs {
                kind: Kind::UrlOpener,
                script: script.to_str().unwrap(),
                cases: vec!["youtube.com".into(), "youtu.be".into()],
                name: Some("ytdl".into()),
                default: false,
                args: vec!["-x".into()],
            },
        )
        .unwrap();
        let r = cfg.load().unwrap();
        let c = r.resolve_opener("youtu.be").unwrap();
        assert_eq!(c.name, "ytdl");
        assert_eq!(c.executable, script.to_string_lossy());
        assert_eq!(c.arguments, ["-x"]);
    }

    #[test]
    fn default_flag_ignores_name_and_cases() {
        let dir = TempDir::new().unwrap();
        let script = executable(&dir, "qr");
        let cfg = ConfigFile::new(dir.path().join("turmyx.toml"), None).unwrap();
        add_script(
            &cfg,
            AddArgs {
                kind: Kind::UrlOpener,
                script: script.to_str().unwrap(),
                cases: vec!["ignored.org".into()],
                name: Some("ignored".into()),
                default: true,
                args: vec![],
            },
        )
        .unwrap();
        let r = cfg.load().unwrap();
        let c = r.resolve_opener("anything.org").unwrap();
        assert_eq!(c.name, "qr");
        assert!(r.partition(Kind::UrlOpener).entries().is_empty());
    }

    #[test]
    fn missing_script_leaves_config_untouched() {
        let dir = TempDir::new().unwrap();
        let cfg = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        let err = add_script(
            &cfg,
            AddArgs {
                kind: Kind::FileEditor,
                script: "/nonexistent/turmyx-editor",
                cases: vec!["txt".into()],
                name: None,
                default: false,
                args: vec![],
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found or not executable"));
        assert!(!cfg.path().exists());
    }
}
