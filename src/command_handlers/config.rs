use crate::platform::platform;
use crate::store::ConfigFile;
use anyhow::{Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Overwrite the active config with FILE's rules
    Replace,
    /// Upsert FILE's rules into the active config
    Merge,
    /// Make the active config a symlink to FILE
    Symlink,
}

pub fn set_config(cfg: &ConfigFile, file: &Path, mode: Mode) -> Result<()> {
    let abs = std::path::absolute(file).with_context(|| format!("resolving {}", file.display()))?;
    println!("Absolute path for provided file: {}", abs.display());
    match mode {
        Mode::Replace => {
            let imported = source_file(cfg, &abs)?.load()?;
            cfg.save(&imported)?;
            println!("Successfully saved into {}.", cfg.path().display());
        }
        Mode::Merge => {
            let imported = source_file(cfg, &abs)?.load()?;
            let mut registry = cfg.load()?;
            registry.merge(imported)?;
            cfg.save(&registry)?;
            println!("Successfully merged {} into {} and saved.", abs.display(), cfg.path().display());
        }
        Mode::Symlink => {
            let source = source_file(cfg, &abs)?;
            if source.format() != cfg.format() {
                warn!(
                    source = ?source.format(),
                    active = ?cfg.format(),
                    "linked file uses a different encoding than the active config path"
                );
            }
            replace_with_link(cfg.path(), &abs, |target, link| platform().link_file(target, link))?;
            println!("Successfully linked {} to {}.", cfg.path().display(), abs.display());
        }
    }
    Ok(())
}

pub fn view(cfg: &ConfigFile) -> Result<()> {
    if !cfg.path().exists() {
        println!("No configuration at {} yet.", cfg.path().display());
        return Ok(());
    }
    print!("{}", fs::read_to_string(cfg.path())?);
    Ok(())
}

/// Link `target` beside `active` under a temporary name, then rename it over `active`.
/// Until the rename, the active file is left as it was.
fn replace_with_link(
    active: &Path,
    target: &Path,
    link: impl FnOnce(&Path, &Path) -> Result<()>,
) -> Result<()> {
    if let Some(parent) = active.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut staged = active.as_os_str().to_owned();
    staged.push(".link-tmp");
    let staged = PathBuf::from(staged);
    if fs::symlink_metadata(&staged).is_ok() {
        fs::remove_file(&staged)?;
    }
    link(target, &staged).with_context(|| format!("linking {}", target.display()))?;
    if let Err(e) = fs::rename(&staged, active) {
        let _ = fs::remove_file(&staged);
        return Err(e.into());
    }
    Ok(())
}

/// FILE bound to its own encoding, or the active one when its extension says nothing.
fn source_file(cfg: &ConfigFile, file: &Path) -> Result<ConfigFile> {
    if !file.exists() {
        anyhow::bail!("{} does not exist", file.display());
    }
    let source = ConfigFile::new(file, None).or_else(|_| ConfigFile::new(file, Some(cfg.format())))?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Kind;
    use crate::registry::{CommandSpec, Registry};
    use tempfile::TempDir;

    fn one_rule(kind: Kind, name: &str, class: &str) -> Registry {
        let mut r = Registry::default();
        r.add(
            kind,
            CommandSpec {
                name: Some(name.into()),
                executable: format!("/usr/bin/{name}"),
                classes: vec![class.into()],
                ..Default::default()
            },
        )
        .unwrap();
        r
    }

    #[test]
    fn replace_converts_into_active_encoding() {
        let dir = TempDir::new().unwrap();
        let src = ConfigFile::new(dir.path().join("mine.toml"), None).unwrap();
        src.save(&one_rule(Kind::FileEditor, "nano", "txt")).unwrap();
        let active = ConfigFile::new(dir.path().join("active/turmyx.yml"), None).unwrap();
        active.save(&one_rule(Kind::UrlOpener, "ytdl", "youtu.be")).unwrap();

        set_config(&active, src.path(), Mode::Replace).unwrap();
        assert_eq!(active.load().unwrap(), one_rule(Kind::FileEditor, "nano", "txt"));
    }

    #[test]
    fn merge_keeps_existing_rules() {
        let dir = TempDir::new().unwrap();
        let src = ConfigFile::new(dir.path().join("mine.yml"), None).unwrap();
        src.save(&one_rule(Kind::FileEditor, "nano", "txt")).unwrap();
        let active = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        active.save(&one_rule(Kind::UrlOpener, "ytdl", "youtu.be")).unwrap();

        set_config(&active, src.path(), Mode::Merge).unwrap();
        let r = active.load().unwrap();
        assert_eq!(r.resolve_editor("txt").unwrap().name, "nano");
        assert_eq!(r.resolve_opener("youtu.be").unwrap().name, "ytdl");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_replaces_active_file() {
        let dir = TempDir::new().unwrap();
        let src = ConfigFile::new(dir.path().join("dotfiles/turmyx.yml"), None).unwrap();
        src.save(&one_rule(Kind::FileEditor, "nano", "txt")).unwrap();
        let active = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        active.save(&Registry::default()).unwrap();

        set_config(&active, src.path(), Mode::Symlink).unwrap();
        assert!(std::fs::symlink_metadata(active.path()).unwrap().file_type().is_symlink());
        assert_eq!(active.load().unwrap(), src.load().unwrap());
    }

    #[test]
    fn failed_link_leaves_active_config_in_place() {
        let dir = TempDir::new().unwrap();
        let active = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        active.save(&one_rule(Kind::FileEditor, "nano", "txt")).unwrap();

        let err = replace_with_link(active.path(), &dir.path().join("elsewhere.yml"), |_, _| {
            anyhow::bail!("permission denied")
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("permission denied"));
        assert_eq!(active.load().unwrap(), one_rule(Kind::FileEditor, "nano", "txt"));
        assert!(!dir.path().join("turmyx.yml.link-tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn stale_staging_link_is_replaced() {
        let dir = TempDir::new().unwrap();
        let src = ConfigFile::new(dir.path().join("mine.yml"), None).unwrap();
        src.save(&one_rule(Kind::UrlOpener, "ytdl", "youtu.be")).unwrap();
        let active = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        std::os::unix::fs::symlink("/nowhere", dir.path().join("turmyx.yml.link-tmp")).unwrap();

        set_config(&active, src.path(), Mode::Symlink).unwrap();
        assert_eq!(active.load().unwrap().resolve_opener("youtu.be").unwrap().name, "ytdl");
        assert!(std::fs::symlink_metadata(dir.path().join("turmyx.yml.link-tmp")).is_err());
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let active = ConfigFile::new(dir.path().join("turmyx.yml"), None).unwrap();
        assert!(set_config(&active, &dir.path().join("nope.yml"), Mode::Replace).is_err());
        assert!(!active.path().exists());
    }
}
