//! Error types for kiln-core

use thiserror::Error;

/// Result type alias using kiln-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for kiln
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid semver version or requirement
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// Running version does not satisfy a declared requirement
    #[error(
        "You are using {id} {current}, but this configuration requires {id} {wanted}.\nPlease upgrade your {id} version."
    )]
    UnsupportedVersion {
        id: String,
        current: String,
        wanted: String,
    },

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create an unsupported version error
    pub fn unsupported_version(
        id: impl Into<String>,
        current: impl Into<String>,
        wanted: impl Into<String>,
    ) -> Self {
        Self::UnsupportedVersion {
            id: id.into(),
            current: current.into(),
            wanted: wanted.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
