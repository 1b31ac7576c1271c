//! Backend selector
//!
//! Reads the configured backend kind and its connection string, builds the
//! client and publishes it in the [`ActiveBackend`] slot. Runs once at startup
//! (and again on explicit re-initialization). It never fails: any problem is
//! logged and leaves the slot empty, so facade calls report `NoBackend`.

use super::guard::panic_message;
use super::slot::{ActiveBackend, SharedBackend};
use crate::config::{CacheSettings, ConfigSource};
use crate::constants::backend_names;
use crate::error::{BackendError, BackendResult};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(any(feature = "cache-memcached", feature = "cache-redis"))]
use super::backends::redact_url;

#[cfg(feature = "cache-memcached")]
use super::backends::MemcachedCacheService;

#[cfg(feature = "cache-moka")]
use super::backends::MokaCacheService;

#[cfg(feature = "cache-redis")]
use super::backends::RedisCacheService;

/// Kind of backend named by `cache.backend`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// Remote in-memory network cache (memcached)
    #[default]
    RemoteMemoryCache,
    /// Replicated key-value store (Redis, Dragonfly)
    ReplicatedKeyValueStore,
    /// In-process cache (Moka)
    InProcess,
}

/// Backend name that matches no known kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cache backend '{0}'")]
pub struct UnknownBackendKind(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackendKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if backend_names::REDIS.contains(&name.as_str()) {
            Ok(Self::ReplicatedKeyValueStore)
        } else if backend_names::MEMCACHED.contains(&name.as_str()) {
            Ok(Self::RemoteMemoryCache)
        } else if backend_names::MOKA.contains(&name.as_str()) {
            Ok(Self::InProcess)
        } else {
            Err(UnknownBackendKind(s.to_string()))
        }
    }
}

impl BackendKind {
    /// Resolve a configured name, falling back to the default kind for unknown names
    pub fn from_config_value(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            let kind = Self::default();
            info!(
                configured = %value,
                backend = %kind,
                "Unrecognized cache backend, using default"
            );
            kind
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteMemoryCache => "memcached",
            Self::ReplicatedKeyValueStore => "redis",
            Self::InProcess => "moka",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds backend clients from configuration and installs them in the slot
#[derive(Debug, Clone)]
pub struct BackendSelector {
    slot: Arc<ActiveBackend>,
}

impl BackendSelector {
    pub fn new(slot: Arc<ActiveBackend>) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &Arc<ActiveBackend> {
        &self.slot
    }

    /// Select, construct and install the configured backend
    ///
    /// The slot ends up holding exactly the new backend, or nothing if
    /// anything went wrong. Errors are logged, never returned.
    pub async fn initialize(&self, source: &dyn ConfigSource) {
        let backend = match CacheSettings::from_source(source) {
            Ok(settings) => match build_backend(&settings).await {
                Ok(backend) => Some(backend),
                Err(e) => {
                    error!(error = %e, "Failed to initialize cache backend, caching disabled");
                    None
                }
            },
            Err(e) => {
                error!(error = %e, "Invalid cache configuration, caching disabled");
                None
            }
        };

        self.slot.replace(backend);
    }
}

/// Resolve the configured kind and construct its client
///
/// A panic during construction is reported as a connection error.
async fn build_backend(settings: &CacheSettings) -> BackendResult<SharedBackend> {
    let kind = BackendKind::from_config_value(&settings.backend);

    let backend = match AssertUnwindSafe(construct(kind, settings))
        .catch_unwind()
        .await
    {
        Ok(result) => result?,
        Err(panic) => {
            return Err(BackendError::Connection(format!(
                "{kind} client construction panicked: {}",
                panic_message(panic.as_ref())
            )));
        }
    };

    info!(
        backend = %kind,
        provider = backend.provider_name(),
        "Cache backend initialized"
    );
    Ok(backend)
}

/// Build a client for `kind`
async fn construct(kind: BackendKind, settings: &CacheSettings) -> BackendResult<SharedBackend> {
    match kind {
        BackendKind::RemoteMemoryCache => construct_memcached(&settings.memcache_host).await,
        BackendKind::ReplicatedKeyValueStore => construct_redis(&settings.redis_host).await,
        BackendKind::InProcess => construct_moka(settings.moka_max_capacity),
    }
}

#[cfg(feature = "cache-memcached")]
async fn construct_memcached(connection: &str) -> BackendResult<SharedBackend> {
    info!(
        backend = "memcached",
        connection = %redact_url(connection),
        "Cache connection parameters"
    );
    let service = MemcachedCacheService::connect(connection).await?;
    Ok(Arc::new(service))
}

#[cfg(not(feature = "cache-memcached"))]
async fn construct_memcached(_connection: &str) -> BackendResult<SharedBackend> {
    Err(BackendError::Connection(
        "memcached backend requested but 'cache-memcached' feature not enabled".to_string(),
    ))
}

#[cfg(feature = "cache-redis")]
async fn construct_redis(connection: &str) -> BackendResult<SharedBackend> {
    info!(backend = "redis", connection = %redact_url(connection), "Cache connection parameters");
    let service = RedisCacheService::connect(connection).await?;
    Ok(Arc::new(service))
}

#[cfg(not(feature = "cache-redis"))]
async fn construct_redis(_connection: &str) -> BackendResult<SharedBackend> {
    Err(BackendError::Connection(
        "Redis backend requested but 'cache-redis' feature not enabled".to_string(),
    ))
}

#[cfg(feature = "cache-moka")]
fn construct_moka(max_capacity: u64) -> BackendResult<SharedBackend> {
    info!(backend = "moka", max_capacity = max_capacity, "Cache connection parameters");
    Ok(Arc::new(MokaCacheService::new(max_capacity)))
}

#[cfg(not(feature = "cache-moka"))]
fn construct_moka(_max_capacity: u64) -> BackendResult<SharedBackend> {
    Err(BackendError::Connection(
        "in-process backend requested but 'cache-moka' feature not enabled".to_string(),
    ))
}
