//! Cache facade
//!
//! Typed put/get/delete over whatever backend the selector installed. Values
//! go through the codec; every backend call goes through the degraded-mode
//! guard.

use super::codec;
use super::guard::guarded;
use super::slot::ActiveBackend;
use super::ttl::ttl_from_seconds;
use crate::error::{CacheError, CacheResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Cache facade over the active backend slot
///
/// Cloning is cheap; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct CacheFacade {
    slot: Arc<ActiveBackend>,
}

impl CacheFacade {
    pub fn new(slot: Arc<ActiveBackend>) -> Self {
        Self { slot }
    }

    /// Shared slot, for handing to a [`BackendSelector`](super::BackendSelector)
    pub fn slot(&self) -> &Arc<ActiveBackend> {
        &self.slot
    }

    /// Whether a backend is currently installed
    pub fn is_available(&self) -> bool {
        self.slot.is_active()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.slot.provider_name()
    }

    /// Store `value` under `key`
    ///
    /// `ttl_seconds <= 0` stores without an explicit expiry. The key is validated
    /// first, so an empty key is `InvalidKey` even with no backend installed;
    /// `NoBackend` is reported before the value is encoded.
    pub async fn put<T>(&self, key: &str, value: &T, ttl_seconds: i64) -> CacheResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        if !self.slot.is_active() {
            return Err(CacheError::NoBackend);
        }

        let payload = codec::encode(value).inspect_err(|e| {
            error!(key = key, error = %e, "Failed to encode cache value");
        })?;
        let ttl = ttl_from_seconds(ttl_seconds);

        let result = guarded(&self.slot, "put", key, |backend| async move {
            backend.put(key, &payload, ttl).await
        })
        .await?;

        result.map_err(|e| {
            error!(key = key, error = %e, "Cache write failed");
            CacheError::BackendWrite {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Fetch and decode the value stored under `key`
    ///
    /// An empty key is `InvalidKey` even with no backend installed.
    pub async fn get<T>(&self, key: &str) -> CacheResult<T>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;

        let result = guarded(&self.slot, "get", key, |backend| async move {
            backend.get(key).await
        })
        .await?;

        let bytes = match result {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = key, "Cache entry not found");
                return Err(CacheError::KeyNotFound {
                    key: key.to_string(),
                });
            }
            Err(e) => {
                error!(key = key, error = %e, "Cache read failed");
                return Err(CacheError::BackendRead {
                    key: key.to_string(),
                    message: e.to_string(),
                });
            }
        };

        codec::decode(&bytes).inspect_err(|e| {
            error!(key = key, error = %e, "Failed to decode cache value");
        })
    }

    /// Remove the entry under `key`; a missing entry is not an error
    ///
    /// An empty key is `InvalidKey` even with no backend installed.
    pub async fn delete(&self, key: &str) -> CacheResult<()> {
        validate_key(key)?;

        let result = guarded(&self.slot, "delete", key, |backend| async move {
            backend.delete(key).await
        })
        .await?;

        match result {
            Ok(existed) => {
                debug!(key = key, existed = existed, "Cache entry deleted");
                Ok(())
            }
            Err(e) => {
                error!(key = key, error = %e, "Cache delete failed");
                Err(CacheError::BackendDelete {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Ask the backend whether it is reachable
    ///
    /// A backend error reads as unhealthy; an empty slot is `NoBackend`.
    pub async fn health_check(&self) -> CacheResult<bool> {
        let result = guarded(&self.slot, "health_check", "", |backend| async move {
            backend.health_check().await
        })
        .await?;

        Ok(result.unwrap_or_else(|e| {
            debug!(error = %e, "Cache health check failed");
            false
        }))
    }
}

fn validate_key(key: &str) -> CacheResult<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    Ok(())
}
