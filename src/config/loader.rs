//! Configuration Loader
//!
//! Layers an optional configuration file and `CACHE_FACADE__*` environment
//! variables into a [`::config::Config`], which the selector consumes through
//! [`super::ConfigSource`].

use super::error::{ConfigResult, ConfigurationError};
use crate::constants::environment::{DEFAULT_CONFIG_FILE, ENV_PREFIX, ENV_SEPARATOR};
use ::config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Builder for the layered cache configuration
///
/// Later sources win: file values are overridden by environment variables.
#[derive(Debug, Clone, Default)]
pub struct CacheConfigLoader {
    config_file: Option<PathBuf>,
    env_overrides: Option<HashMap<String, String>>,
}

impl CacheConfigLoader {
    /// Loader reading `config/cache.*` (if present) and the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an explicit configuration file instead of `config/cache.*`
    ///
    /// Unlike the default file, an explicit file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use the given variables instead of the process environment
    ///
    /// Keys use the same form as real variables (`CACHE_FACADE__CACHE__BACKEND`).
    pub fn with_env_overrides(mut self, vars: HashMap<String, String>) -> Self {
        self.env_overrides = Some(vars);
        self
    }

    /// Build the layered configuration
    pub fn load(&self) -> ConfigResult<Config> {
        let mut builder = Config::builder();

        match &self.config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigurationError::FileNotFound {
                        file_path: path.display().to_string(),
                    });
                }
                debug!(file = %path.display(), "Loading cache configuration file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .source(self.env_overrides.clone());

        let config = builder.add_source(environment).build()?;
        Ok(config)
    }
}
