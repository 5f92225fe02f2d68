//! Route a file or URL to the external program configured for its extension or domain.
//!
//! The [`registry::Registry`] holds the rules, [`store`] reads and writes them,
//! and [`launcher`] runs whatever a rule resolves to.

pub mod classify;
pub mod cli;
pub mod command;
pub mod command_handlers;
pub mod error;
pub mod launcher;
pub mod platform;
pub mod registry;
pub mod store;

pub use command::{Command, Kind};
pub use error::{LaunchError, RegistryError, StoreError};
pub use registry::{CommandSpec, Registry};
pub use store::{load_config, save_config, ConfigFile, ConfigStore, Format};
