//! Cache service trait definition
//!
//! The minimal capability contract every backend client satisfies. Values are
//! opaque bytes produced by the codec; backends never see typed values.

use crate::error::BackendResult;
use async_trait::async_trait;
use std::time::Duration;

/// Trait defining backend cache operations
///
/// Implemented by the memcached, Redis and Moka clients, and by any custom
/// backend a host installs directly into the active backend slot.
#[async_trait]
pub trait CacheService: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache by key
    ///
    /// Returns `Ok(Some(bytes))` on hit, `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>>;

    /// Store a value, with `None` meaning no explicit expiry
    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> BackendResult<()>;

    /// Delete a key
    ///
    /// Returns `Ok(false)` when the key did not exist; that is not a failure.
    async fn delete(&self, key: &str) -> BackendResult<bool>;

    /// Check if the cache backend is reachable
    async fn health_check(&self) -> BackendResult<bool>;

    /// Get the name of the cache provider
    fn provider_name(&self) -> &'static str;
}
