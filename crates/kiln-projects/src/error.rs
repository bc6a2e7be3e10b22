//! Error types for kiln-projects

use thiserror::Error;

/// Result type alias using kiln-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project bootstrap error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name rejected by the validator
    #[error("Invalid project name: \"{name}\"")]
    InvalidProjectName {
        name: String,
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    /// A create option carries an unusable value
    #[error("{message}")]
    InvalidOption { message: String },

    /// Unsupported package manager
    #[error("Unknown package manager: {name}. Available: {available}")]
    UnknownPackageManager { name: String, available: String },

    /// Generator engine failure
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid project name error
    pub fn invalid_project_name(
        name: impl Into<String>,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            errors,
            warnings,
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption {
            message: message.into(),
        }
    }

    /// Create an unknown package manager error
    pub fn unknown_package_manager(name: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownPackageManager {
            name: name.into(),
            available: available.into(),
        }
    }

    /// Whether this is a usage problem (bad name or option) rather than a runtime failure
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProjectName { .. }
                | Self::InvalidOption { .. }
                | Self::UnknownPackageManager { .. }
        )
    }
}

/// Failures of the generator engine
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The generator program could not be started
    #[error("Failed to start generator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator program exited unsuccessfully
    #[error("Generator '{program}' failed with {status}")]
    Failed { program: String, status: String },

    /// The request could not be encoded for the engine
    #[error("Failed to encode generator request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Engine-specific failure
    #[error("Generation failed: {message}")]
    Other { message: String },

    /// IO error while talking to the engine
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Create a spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a failed-exit error
    pub fn failed(program: impl Into<String>, status: impl Into<String>) -> Self {
        Self::Failed {
            program: program.into(),
            status: status.into(),
        }
    }

    /// Create a generic engine error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
