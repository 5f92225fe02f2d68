use crate::command::{Command, Kind};
use crate::store::ConfigFile;
use anyhow::Result;

pub fn list(cfg: &ConfigFile, json: bool) -> Result<()> {
    let registry = cfg.load()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }
    if registry.is_empty() {
        println!("No scripts configured in {}", cfg.path().display());
        return Ok(());
    }
    for kind in Kind::ALL {
        let partition = registry.partition(kind);
        println!("[{kind}]");
        for c in partition.entries() {
            let classes: Vec<&str> = c.classes.iter().map(String::as_str).collect();
            println!("  {} -> {} ({})", c.name, program_line(c), classes.join(" "));
        }
        match partition.default_command() {
            Some(d) => println!("  default: {} -> {}", d.name, program_line(d)),
            None => println!("  default: <none>"),
        }
    }
    Ok(())
}

fn program_line(c: &Command) -> String {
    std::iter::once(c.executable.as_str())
        .chain(c.arguments.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
