//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

/// Interactive file manager: list, create, read, delete and move files with plain-text commands
#[derive(Parser, Debug)]
#[command(name = "filebot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory relative paths resolve against (default: cwd)
    #[arg(short = 'C', long = "dir", value_hint = ValueHint::DirPath)]
    pub working_dir: Option<PathBuf>,

    /// Do not print the start banner
    #[arg(long)]
    pub no_banner: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,
}
