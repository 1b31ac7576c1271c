//! Process-wide cache
//!
//! One [`CacheFacade`] shared by the whole process. Until [`initialize`] runs
//! (or after it fails, or after a backend fault) every operation returns
//! [`CacheError::NoBackend`](crate::CacheError::NoBackend).
//!
//! ```rust,no_run
//! # async fn example() -> cache_facade::CacheResult<()> {
//! cache_facade::global::initialize().await;
//!
//! cache_facade::global::put("session:1", &vec![1, 2, 3], 300).await?;
//! let session: Vec<u32> = cache_facade::global::get("session:1").await?;
//! cache_facade::global::delete("session:1").await?;
//! # Ok(())
//! # }
//! ```

use crate::cache::{BackendSelector, CacheFacade};
use crate::config::{CacheConfigLoader, ConfigSource};
use crate::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::error;

static GLOBAL_CACHE: OnceLock<CacheFacade> = OnceLock::new();

/// The process-wide facade
pub fn facade() -> &'static CacheFacade {
    GLOBAL_CACHE.get_or_init(CacheFacade::default)
}

/// Load configuration from `config/cache.*` and the environment, then select
/// and install the backend
///
/// Never fails; problems are logged and leave caching disabled.
pub async fn initialize() {
    match CacheConfigLoader::new().load() {
        Ok(config) => initialize_from(&config).await,
        Err(e) => {
            error!(error = %e, "Failed to load cache configuration, caching disabled");
            facade().slot().clear();
        }
    }
}

/// Select and install the backend from an explicit configuration source
pub async fn initialize_from(source: &dyn ConfigSource) {
    BackendSelector::new(facade().slot().clone())
        .initialize(source)
        .await;
}

pub async fn put<T>(key: &str, value: &T, ttl_seconds: i64) -> CacheResult<()>
where
    T: Serialize + ?Sized,
{
    facade().put(key, value, ttl_seconds).await
}

pub async fn get<T>(key: &str) -> CacheResult<T>
where
    T: DeserializeOwned,
{
    facade().get(key).await
}

pub async fn delete(key: &str) -> CacheResult<()> {
    facade().delete(key).await
}
