//! kiln CLI - Project scaffolding
//!
//! This is the main entry point for the kiln command-line interface.

mod cli;
mod commands;
mod output;
mod prompt;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use kiln_core::{route, CommandRegistry, EnvSnapshot, Route, RuntimeConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, GLOBAL_OPTIONS};

const PROGRAM: &str = "kiln";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cwd = kiln_core::utils::current_dir().context("Failed to read working directory")?;
    let runtime = RuntimeConfig::from_env(EnvSnapshot::capture(), cwd);

    init_tracing(cli.verbose, cli.quiet, runtime.debug);
    if runtime.debug {
        tracing::debug!("Debug mode enabled for {}", runtime.cwd);
    }

    let test_mode = runtime.test_mode;
    match run(cli, runtime).await {
        Ok(code) => Ok(code),
        // Test harnesses get the error value itself
        Err(err) if test_mode => Err(err),
        Err(err) => {
            output::report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: Cli, runtime: RuntimeConfig) -> Result<ExitCode> {
    let config = runtime
        .load_user_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    config.check_engines(env!("CARGO_PKG_VERSION"))?;

    let registry = CommandRegistry::builtin()?;

    if cli.help {
        print_help(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let routed = match route(&registry, &cli.args) {
        Ok(routed) => routed,
        Err(err) => {
            if let Some(spec) = cli.args.first().and_then(|name| registry.dispatch(name)) {
                println!("{}", spec.help_text(PROGRAM));
            }
            return Err(err.into());
        }
    };

    match routed {
        Route::Empty => {
            print_help(&registry);
            Ok(ExitCode::SUCCESS)
        }
        Route::Unknown {
            command,
            suggestion,
        } => {
            print_help(&registry);
            println!("  {}", style(format!("Unknown command {}.", style(&command).yellow())).red());
            if let Some(suggestion) = suggestion {
                println!("  {}", style(format!("Did you mean {}?", style(suggestion).yellow())).red());
            }
            Ok(ExitCode::FAILURE)
        }
        Route::Matched { spec, invocation } => {
            if invocation.help_requested {
                println!("{}", spec.help_text(PROGRAM));
                return Ok(ExitCode::SUCCESS);
            }
            for warning in &invocation.warnings {
                println!("\n {}", style(format!("Info: {}", warning)).yellow());
            }
            commands::run(spec, &invocation, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_help(registry: &CommandRegistry) {
    println!("{}", registry.help_text(PROGRAM));
    println!("{}", GLOBAL_OPTIONS);
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool, debug: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        _ => "trace",
    };
    // Debug mode never shows less than debug output
    let level = if debug && matches!(level, "error" | "warn") {
        "debug"
    } else {
        level
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(level))
        .init();
}
