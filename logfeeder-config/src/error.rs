//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The mandatory properties source could not be located
    #[error("Cannot find {identifier} on the resolution path")]
    MissingPropertySource { identifier: String },

    /// A declared setting could not be coerced to its type
    #[error("Failed to resolve setting '{key}' from value '{value}': {reason}")]
    Resolution {
        key: String,
        value: String,
        reason: String,
    },

    /// IO error reading a named properties file
    #[error("Failed to read properties file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Other IO error
    #[error("IO error: {0}")]
    FileReadError(#[from] std::io::Error),

    /// Malformed properties file content
    #[error("Malformed properties input at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// JSON rendering error
    #[error("Failed to render JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed programmatic or command-line override
    #[error("Invalid property override: {0}")]
    InvalidOverride(String),
}

impl ConfigError {
    /// Helper to create a resolution error for a setting
    pub fn resolution(key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Resolution {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Key of the setting that failed, if the error is tied to one
    pub fn setting_key(&self) -> Option<&str> {
        match self {
            ConfigError::Resolution { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
