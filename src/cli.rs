use crate::command::Kind;
use crate::store::Format;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "turmyx",
    about = "turmyx: a script launcher for files and URLs shared to the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config (defaults to <config dir>/turmyx/turmyx.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Config encoding; by default taken from the file extension (.yml/.yaml, or .ini/.cfg/.toml)
    #[arg(long, value_enum, global = true)]
    pub format: Option<Format>,

    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the suitable editor for a file, chosen by its extension.
    ///
    /// Link this as termux-file-editor to use it from Termux:
    ///   ln -s $PREFIX/bin/turmyx ~/bin/termux-file-editor
    Editor {
        #[arg(value_name = "FILE")]
        file: String,
    },
    /// Run the suitable opener for a URL, chosen by its domain.
    ///
    /// Link this as termux-url-opener to use it from Termux:
    ///   ln -s $PREFIX/bin/turmyx ~/bin/termux-url-opener
    Opener {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Add or replace a script configuration.
    /// Examples:
    ///   turmyx add editor nano txt md ini
    ///   turmyx add --name radare editor r2 exe
    ///   turmyx add opener youtube-dl youtube.com youtu.be
    ///   turmyx add --default opener qr
    Add {
        /// editor | opener
        #[arg(value_enum)]
        kind: Kind,
        /// Program to run; must be found on PATH or be a path to an executable
        script: String,
        /// Extensions (editor) or domains (opener) handled by SCRIPT
        #[arg(value_name = "CASES")]
        cases: Vec<String>,
        /// Name for the entry; defaults to the script's file name
        #[arg(long)]
        name: Option<String>,
        /// Save as the fallback for KIND; --name and CASES are ignored
        #[arg(long)]
        default: bool,
        /// Argument passed to SCRIPT before the file/URL (repeatable)
        #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove a script configuration ("default" removes the fallback)
    Remove {
        #[arg(value_enum)]
        kind: Kind,
        name: String,
    },
    /// Replace, merge or link the active configuration from FILE, and/or print it.
    Config {
        /// Configuration file to take rules from (.yml/.yaml, or .ini/.cfg/.toml)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Merge FILE into the existing configuration instead of replacing it
        #[arg(long, conflicts_with = "symlink", requires = "file")]
        merge: bool,
        /// Make the active configuration a symlink to FILE
        #[arg(long, requires = "file")]
        symlink: bool,
        /// Print the active configuration file
        #[arg(long)]
        view: bool,
    },
    /// List configured rules
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
