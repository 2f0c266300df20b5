use std::path::PathBuf;

use thiserror::Error;

use crate::outcome::ValidationOutcome;

/// Main library error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("{executable} not found at {location}")]
    RuntimeNotFound {
        executable: String,
        location: String,
    },

    #[error("Java SDK required at JAVA_HOME or in path to compile validation helper")]
    CompileToolMissing {
        #[source]
        source: Box<ValidatorError>,
    },

    #[error("Failed to compile helper (exitCode={exit_code})")]
    CompilationFailed { exit_code: i32 },

    #[error(
        "unsupported <xml> parameter: found {found}, expected text|bytes|stream|{{ file: path }}"
    )]
    UnsupportedInputType { found: String },

    #[error("Failed to start {program}: {source}")]
    ProcessSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", .0.describe())]
    ValidationFailed(ValidationOutcome),

    #[error("Stream error: {0}")]
    StreamError(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation session closed before producing a result")]
    SessionClosed,
}

impl ValidatorError {
    /// Structured payload of a failed validation, if this is one
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            ValidatorError::ValidationFailed(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// True when a required Java executable could not be discovered
    pub fn is_runtime_not_found(&self) -> bool {
        matches!(
            self,
            ValidatorError::RuntimeNotFound { .. } | ValidatorError::CompileToolMissing { .. }
        )
    }
}

/// Configuration-specific error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
