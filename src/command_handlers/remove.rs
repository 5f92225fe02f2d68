use crate::command::Kind;
use crate::error::RegistryError;
use crate::store::ConfigFile;
use anyhow::Result;

pub fn remove_script(cfg: &ConfigFile, kind: Kind, name: &str) -> Result<()> {
    let mut registry = cfg.load()?;
    match registry.remove(kind, name) {
        Ok(_) => {
            cfg.save(&registry)?;
            println!("Script configuration successfully removed!");
            Ok(())
        }
        Err(RegistryError::NotFound { suggestions, .. }) if !suggestions.is_empty() => {
            anyhow::bail!(
                "{kind} '{name}' not found. Maybe you want to say:\n{}",
                suggestions.join("\n")
            )
        }
        Err(e) => Err(e.into()),
    }
}
