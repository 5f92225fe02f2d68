use crate::cli::Commands;
use crate::command::Kind;
use crate::command_handlers::{add, config, launch, list, remove};
use crate::store::ConfigFile;
use anyhow::Result;

pub fn dispatch(cmd: Commands, cfg: &ConfigFile) -> Result<()> {
    match cmd {
        Commands::Editor { file } => launch::run(cfg, Kind::FileEditor, &file),
        Commands::Opener { url } => launch::run(cfg, Kind::UrlOpener, &url),
        Commands::Add {
            kind,
            script,
            cases,
            name,
            default,
            args,
        } => add::add_script(
            cfg,
            add::AddArgs {
                kind,
                script: &script,
                cases,
                name,
                default,
                args,
            },
        ),
        Commands::Remove { kind, name } => remove::remove_script(cfg, kind, &name),
        Commands::Config {
            file,
            merge,
            symlink,
            view,
        } => {
            if let Some(file) = file {
                let mode = if merge {
                    config::Mode::Merge
                } else if symlink {
                    config::Mode::Symlink
                } else {
                    config::Mode::Replace
                };
                config::set_config(cfg, &file, mode)?;
            }
            if view {
                config::view(cfg)?;
            }
            Ok(())
        }
        Commands::List { json } => list::list(cfg, json),
    }
}
