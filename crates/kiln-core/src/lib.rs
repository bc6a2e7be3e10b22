//! # kiln-core
//!
//! Core library for the kiln CLI providing:
//! - The immutable command registry and its option schemas
//! - Schema-driven argument parsing for registered commands
//! - Nearest-match suggestions for unknown command names
//! - User configuration (~/.kiln/config.yaml) and the runtime configuration
//!   assembled once at startup

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod utils;

pub use cli::{
    route, CommandRegistry, CommandSpec, Operation, OptionValue, ParseError, ParsedInvocation,
    Route,
};
pub use config::{KilnConfig, RuntimeConfig};
pub use environment::EnvSnapshot;
pub use error::{Error, Result};
