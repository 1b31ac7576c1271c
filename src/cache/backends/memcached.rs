//! Memcached cache provider
//!
//! The remote in-memory cache backend, speaking the memcached protocol through
//! `async-memcached`. Requires the `cache-memcached` feature flag.

use super::redact_url;
use crate::cache::traits::CacheService;
use crate::constants::{MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS, MEMCACHED_SCHEME};
use crate::error::{BackendError, BackendResult};
use async_memcached::{AsciiProtocol, Client};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Memcached-backed cache service
///
/// The client owns a single connection, so calls are serialized through a mutex.
#[derive(Clone)]
pub struct MemcachedCacheService {
    client: Arc<Mutex<Client>>,
    url: String,
}

impl std::fmt::Debug for MemcachedCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcachedCacheService")
            .field("url", &redact_url(&self.url))
            .field("client", &"Client")
            .finish()
    }
}

impl MemcachedCacheService {
    /// Connect to memcached
    ///
    /// Accepts `tcp://host:port`, `unix:///path` or a bare `host:port`.
    pub async fn connect(connection: &str) -> BackendResult<Self> {
        let url = normalize_memcached_url(connection)?;

        let client = Client::new(url.as_str()).await.map_err(|e| {
            BackendError::Connection(format!("Failed to connect to memcached: {}", e))
        })?;

        debug!(url = %redact_url(&url), "Memcached cache service connected");

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            url,
        })
    }
}

#[async_trait]
impl CacheService for MemcachedCacheService {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        let mut client = self.client.lock().await;

        let result = client
            .get(key)
            .await
            .map_err(|e| BackendError::Operation(format!("Memcached GET failed: {}", e)))?;

        match result {
            Some(value) => {
                debug!(key = key, "Cache HIT (memcached)");
                Ok(value.data)
            }
            None => {
                debug!(key = key, "Cache MISS (memcached)");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> BackendResult<()> {
        let expiration = memcached_expiration(ttl, Utc::now().timestamp());
        let mut client = self.client.lock().await;

        client
            .set(key, value, Some(expiration), None)
            .await
            .map_err(|e| BackendError::Operation(format!("Memcached SET failed: {}", e)))?;

        debug!(key = key, expiration = expiration, "Cache SET (memcached)");
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<bool> {
        let mut client = self.client.lock().await;

        match client.delete(key).await {
            Ok(()) => {
                debug!(key = key, "Cache DEL (memcached)");
                Ok(true)
            }
            Err(async_memcached::Error::Protocol(async_memcached::Status::NotFound)) => {
                debug!(key = key, "Cache DEL of missing key (memcached)");
                Ok(false)
            }
            Err(e) => Err(BackendError::Operation(format!(
                "Memcached DELETE failed: {}",
                e
            ))),
        }
    }

    async fn health_check(&self) -> BackendResult<bool> {
        let mut client = self.client.lock().await;

        match client.version().await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(error = %e, "Memcached health check failed");
                Ok(false)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "memcached"
    }
}

/// Memcached expiration value for a ttl
///
/// `0` means never expire. Memcached reads values above 30 days as absolute
/// unix timestamps, so longer ttls are converted to one.
fn memcached_expiration(ttl: Option<Duration>, now_unix: i64) -> i64 {
    match ttl {
        None => 0,
        Some(ttl) => {
            let secs = ttl.as_secs().max(1);
            if secs > MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS {
                now_unix.saturating_add(i64::try_from(secs).unwrap_or(i64::MAX))
            } else {
                secs as i64
            }
        }
    }
}

/// Prefix a bare `host:port` with the tcp scheme
fn normalize_memcached_url(connection: &str) -> BackendResult<String> {
    let connection = connection.trim();
    if connection.is_empty() {
        return Err(BackendError::Connection(
            "Memcached connection string is empty".to_string(),
        ));
    }

    if connection.contains("://") {
        Ok(connection.to_string())
    } else {
        Ok(format!("{MEMCACHED_SCHEME}{connection}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_without_ttl_never_expires() {
        assert_eq!(memcached_expiration(None, 1_700_000_000), 0);
    }

    #[test]
    fn test_expiration_relative_within_30_days() {
        assert_eq!(
            memcached_expiration(Some(Duration::from_secs(60)), 1_700_000_000),
            60
        );
        assert_eq!(
            memcached_expiration(
                Some(Duration::from_secs(MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS)),
                1_700_000_000
            ),
            MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS as i64
        );
    }

    #[test]
    fn test_expiration_beyond_30_days_is_absolute() {
        let ttl = MEMCACHED_MAX_RELATIVE_EXPIRATION_SECS + 1;
        assert_eq!(
            memcached_expiration(Some(Duration::from_secs(ttl)), 1_700_000_000),
            1_700_000_000 + ttl as i64
        );
    }

    #[test]
    fn test_sub_second_ttl_rounds_up() {
        assert_eq!(
            memcached_expiration(Some(Duration::from_millis(200)), 0),
            1
        );
    }

    #[test]
    fn test_normalize_memcached_url() {
        assert_eq!(
            normalize_memcached_url("localhost:11211").unwrap(),
            "tcp://localhost:11211"
        );
        assert_eq!(
            normalize_memcached_url("unix:///tmp/memcached.sock").unwrap(),
            "unix:///tmp/memcached.sock"
        );
        assert!(normalize_memcached_url("").is_err());
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_fails() {
        let result = MemcachedCacheService::connect("tcp://127.0.0.1:1").await;
        assert!(matches!(result, Err(BackendError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_with_empty_string_fails() {
        let result = MemcachedCacheService::connect("  ").await;
        assert!(matches!(result, Err(BackendError::Connection(_))));
    }

    // Integration tests require a running Memcached instance (behind test-services feature)
    #[cfg(feature = "test-services")]
    mod integration {
        use super::*;
        use tracing::warn;

        fn memcached_url() -> String {
            std::env::var("MEMCACHED_URL").unwrap_or_else(|_| "tcp://localhost:11211".to_string())
        }

        #[tokio::test]
        async fn test_memcached_crud_operations() {
            let svc = match MemcachedCacheService::connect(&memcached_url()).await {
                Ok(svc) => svc,
                Err(e) => {
                    warn!("Skipping Memcached test (not available): {}", e);
                    return;
                }
            };

            let key = format!("test:crud:{}", uuid::Uuid::new_v4());

            svc.put(&key, b"value", Some(Duration::from_secs(60)))
                .await
                .unwrap();
            assert_eq!(svc.get(&key).await.unwrap(), Some(b"value".to_vec()));

            assert!(svc.delete(&key).await.unwrap());
            assert_eq!(svc.get(&key).await.unwrap(), None);
            assert!(!svc.delete(&key).await.unwrap());
        }

        #[tokio::test]
        async fn test_memcached_health_check() {
            let svc = match MemcachedCacheService::connect(&memcached_url()).await {
                Ok(svc) => svc,
                Err(e) => {
                    warn!("Skipping Memcached test (not available): {}", e);
                    return;
                }
            };

            assert!(svc.health_check().await.unwrap());
        }
    }
}
