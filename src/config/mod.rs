//! # Cache Configuration
//!
//! The backend selector reads its settings through [`ConfigSource`], a plain
//! key-value lookup. Any configuration system can feed the facade by
//! implementing it; implementations are provided for [`::config::Config`]
//! (file + environment layering, see [`CacheConfigLoader`]) and for
//! `HashMap<String, String>`.
//!
//! ## Keys
//!
//! ```toml
//! [cache]
//! backend = "redis"                 # redis | dragonfly | memcache(d) | moka | memory | in-memory
//! memcache_host = "127.0.0.1:11211"
//! redis_host = "127.0.0.1:6379"
//! moka_max_capacity = 10000
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cache_facade::config::{CacheConfigLoader, CacheSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = CacheConfigLoader::new().load()?;
//! let settings = CacheSettings::from_source(&source)?;
//! println!("backend: {}", settings.backend);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{config_keys, DEFAULT_MOKA_MAX_CAPACITY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::CacheConfigLoader;

/// Key-value lookup consumed by the backend selector
pub trait ConfigSource: Send + Sync {
    /// Look up a string value by dotted key (`cache.backend`)
    fn get_string(&self, key: &str) -> Option<String>;
}

impl ConfigSource for ::config::Config {
    fn get_string(&self, key: &str) -> Option<String> {
        ::config::Config::get_string(self, key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }
}

/// Typed view of the `cache` section
///
/// Missing strings become empty: the selector decides what an empty backend
/// name or connection string means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Raw backend kind string as configured
    pub backend: String,

    /// Connection string for the memcached backend
    pub memcache_host: String,

    /// Connection string for the Redis backend
    pub redis_host: String,

    /// Entry capacity for the in-process backend
    pub moka_max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: String::new(),
            memcache_host: String::new(),
            redis_host: String::new(),
            moka_max_capacity: DEFAULT_MOKA_MAX_CAPACITY,
        }
    }
}

impl CacheSettings {
    /// Read the `cache` section from a configuration source
    pub fn from_source(source: &dyn ConfigSource) -> ConfigResult<Self> {
        let lookup = |key: &str| {
            source
                .get_string(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let moka_max_capacity = match source.get_string(config_keys::MOKA_MAX_CAPACITY) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigurationError::invalid_value(config_keys::MOKA_MAX_CAPACITY, raw.clone(), e)
            })?,
            None => DEFAULT_MOKA_MAX_CAPACITY,
        };

        if moka_max_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                config_keys::MOKA_MAX_CAPACITY,
                "0",
                "capacity must be greater than zero",
            ));
        }

        Ok(Self {
            backend: lookup(config_keys::BACKEND),
            memcache_host: lookup(config_keys::MEMCACHE_HOST),
            redis_host: lookup(config_keys::REDIS_HOST),
            moka_max_capacity,
        })
    }
}
