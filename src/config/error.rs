//! Configuration Error Types
//!
//! Errors raised while loading the cache configuration or reading typed
//! values out of it.

use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Configuration sources could not be loaded or merged
    #[error("Failed to load configuration: {error}")]
    LoadError { error: String },

    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {file_path}")]
    FileNotFound { file_path: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl ConfigurationError {
    /// Create a load error from any displayable source
    pub fn load_error<E: std::fmt::Display>(error: E) -> Self {
        Self::LoadError {
            error: error.to_string(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<F, V, C>(field: F, value: V, context: C) -> Self
    where
        F: Into<String>,
        V: Into<String>,
        C: std::fmt::Display,
    {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.to_string(),
        }
    }
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::load_error(e)
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
