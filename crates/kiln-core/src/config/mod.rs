//! Configuration loading and management

mod loader;
mod runtime;

pub use loader::{
    default_config_path, EnginesConfig, GeneratorConfig, KilnConfig, CONFIG_FILE_NAME,
};
pub use runtime::RuntimeConfig;
