//! # Cache Constants
//!
//! Configuration keys, accepted backend names and defaults shared by the
//! selector, the configuration loader and the backends.

/// Keys looked up in the configuration source (all under the `cache` section)
pub mod config_keys {
    pub const BACKEND: &str = "cache.backend";
    pub const MEMCACHE_HOST: &str = "cache.memcache_host";
    pub const REDIS_HOST: &str = "cache.redis_host";
    pub const MOKA_MAX_CAPACITY: &str = "cache.moka_max_capacity";
}

/// Backend names accepted in `cache.backend`
pub mod backend_names {
    pub const REDIS: &[&str] = &["redis", "dragonfly"];
    pub const MEMCACHED: &[&str] = &["memcache", "memcached"];
    pub const MOKA: &[&str] = &["moka", "memory", "in-memory"];
}

/// Environment and file settings for configuration loading
pub mod environment {
    /// Prefix for environment variable overrides (`CACHE_FACADE__CACHE__BACKEND`)
    pub const ENV_PREFIX: &str = "CACHE_FACADE";
    pub const ENV_SEPARATOR: &str = "__";
    /// Base name of the optional configuration file, resolved without extension
    pub const DEFAULT_CONFIG_FILE: &str = "config/cache";
    pub const ENVIRONMENT_VARS: &[&str] = &["CACHE_FACADE_ENV", "APP_ENV"];
    pub const LOG_FORMAT_VAR: &str = "CACHE_FACADE_LOG_FORMAT";
}

/// Default entry capacity of the in-process backend
pub const DEFAULT_MOKA_MAX_CAPACITY: u64 = 10_000;

/// Memcached treats expirations above 30 days as absolute unix timestamps
pub const MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS: u64 = 60 * 60 * 24 * 30;

pub const REDIS_SCHEME: &str = "redis://";
pub const REDIS_TLS_SCHEME: &str = "rediss://";
pub const MEMCACHED_SCHEME: &str = "tcp://";
