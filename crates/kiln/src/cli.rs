//! CLI argument parsing with clap
//!
//! clap owns only the global flags. Everything from the command name onward
//! is captured verbatim and routed through the command registry.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

/// kiln - Project scaffolding
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to the kiln config file
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,

    /// Output usage information
    #[arg(short, long)]
    pub help: bool,

    /// Command and its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Global options shown under the command list
pub const GLOBAL_OPTIONS: &str = "\
Options:
  -V, --version        output the version number
  -v, --verbose        increase log verbosity (-v, -vv)
  -q, --quiet          only report errors
  -c, --config <path>  path to the kiln config file
  -h, --help           output usage information
";
