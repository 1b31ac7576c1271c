//! In-memory cache provider using Moka
//!
//! In-process cache for single-instance deployments and tests. Unlike the
//! remote backends this one shares nothing across processes. Each entry keeps
//! its own ttl; entries stored without ttl never expire but remain subject to
//! capacity eviction.

use crate::cache::traits::CacheService;
use crate::error::BackendResult;
use async_trait::async_trait;
use moka::Expiry;
use std::time::{Duration, Instant};
use tracing::debug;

/// Stored value together with its requested ttl
#[derive(Debug, Clone)]
struct MokaEntry {
    data: Vec<u8>,
    ttl: Option<Duration>,
}

/// Per-entry expiration policy: every write resets the clock to the entry's own ttl
struct EntryExpiry;

impl Expiry<String, MokaEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &MokaEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &MokaEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-memory cache service using Moka
#[derive(Clone)]
pub struct MokaCacheService {
    cache: moka::future::Cache<String, MokaEntry>,
}

impl std::fmt::Debug for MokaCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheService")
            .field("max_capacity", &self.cache.policy().max_capacity())
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl MokaCacheService {
    /// Create a Moka cache holding at most `max_capacity` entries
    pub fn new(max_capacity: u64) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        debug!(max_capacity = max_capacity, "Moka in-memory cache service created");

        Self { cache }
    }

    /// Flush pending maintenance (expirations, evictions)
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Approximate number of live entries
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheService for MokaCacheService {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        let result = self.cache.get(key).await.map(|entry| entry.data);

        if result.is_some() {
            debug!(key = key, "Cache HIT (moka)");
        } else {
            debug!(key = key, "Cache MISS (moka)");
        }

        Ok(result)
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> BackendResult<()> {
        self.cache
            .insert(
                key.to_string(),
                MokaEntry {
                    data: value.to_vec(),
                    ttl,
                },
            )
            .await;

        debug!(
            key = key,
            ttl_seconds = ttl.map(|t| t.as_secs()),
            "Cache SET (moka)"
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<bool> {
        let existed = self.cache.remove(key).await.is_some();
        debug!(key = key, existed = existed, "Cache DEL (moka)");
        Ok(existed)
    }

    async fn health_check(&self) -> BackendResult<bool> {
        // In-memory cache is always healthy
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "moka"
    }
}
