use crate::platform::PlatformOps;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn home_dir(&self) -> Option<PathBuf> { std::env::var_os("USERPROFILE").map(PathBuf::from) }
    fn config_dir(&self) -> Option<PathBuf> { dirs::config_dir() }
    fn program_name(&self, argv0: &str) -> String { Path::new(argv0).file_stem().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default() }
    fn link_file(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::windows::fs::symlink_file(target, link)
            .with_context(|| format!("linking {} -> {} (needs Developer Mode or admin)", link.display(), target.display()))
    }
}
