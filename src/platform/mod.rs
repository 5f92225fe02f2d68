pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use anyhow::Result;
use std::path::{Path, PathBuf};

pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf>;
    fn config_dir(&self) -> Option<PathBuf>;
    /// Name the binary was invoked as, without directory or platform suffix.
    fn program_name(&self, argv0: &str) -> String;
    /// Point `link` at `target`.
    fn link_file(&self, target: &Path, link: &Path) -> Result<()>;

    fn default_config_file(&self) -> Option<PathBuf> {
        self.config_dir().map(|d| d.join("turmyx").join("turmyx.yml"))
    }
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
