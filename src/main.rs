use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use turmyx::cli::Cli;
use turmyx::command_handlers;
use turmyx::platform::platform;
use turmyx::ConfigFile;

fn main() -> Result<()> {
    let cli = Cli::parse_from(with_implied_subcommand(std::env::args_os().collect()));
    init_logging(cli.verbose);

    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let cfg = ConfigFile::new(path, cli.format)?;
    command_handlers::dispatch::dispatch(cli.command, &cfg)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn default_config_path() -> PathBuf {
    platform()
        .default_config_file()
        .unwrap_or_else(|| PathBuf::from("turmyx.yml"))
}

/// When invoked through a link named like `termux-file-editor` or
/// `termux-url-opener`, behave as `turmyx editor` / `turmyx opener`.
fn with_implied_subcommand(mut args: Vec<OsString>) -> Vec<OsString> {
    let Some(argv0) = args.first() else { return args };
    let program = platform().program_name(&argv0.to_string_lossy());
    let implied = if program.ends_with("file-editor") {
        Some("editor")
    } else if program.ends_with("url-opener") {
        Some("opener")
    } else {
        None
    };
    if let Some(sub) = implied {
        args.insert(1, OsString::from(sub));
    }
    args
}
