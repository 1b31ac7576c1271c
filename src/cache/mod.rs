//! # Cache Facade Module
//!
//! Typed put/get/delete over interchangeable cache backends.
//!
//! ## Architecture
//!
//! ```text
//! BackendSelector ──initialize──▶ ActiveBackend (RwLock<Option<Arc<dyn CacheService>>>)
//!                                       ▲            │
//!                       clear on fault  │            │ clone Arc
//!                                       │            ▼
//! CacheFacade ── codec ── guard (catch_unwind) ── CacheService
//!                                                  ├── MemcachedCacheService
//!                                                  ├── RedisCacheService
//!                                                  └── MokaCacheService
//! ```
//!
//! ## Design Decisions
//!
//! - **Trait objects**: hosts and tests can install their own backend
//! - **Degraded mode**: a backend panic disables caching until re-initialization
//! - **No fallback chain**: an unreachable backend leaves the slot empty
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cache_facade::cache::{ActiveBackend, BackendSelector, CacheFacade};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), cache_facade::CacheError> {
//! let slot = Arc::new(ActiveBackend::new());
//! let config = HashMap::from([("cache.backend".to_string(), "moka".to_string())]);
//! BackendSelector::new(slot.clone()).initialize(&config).await;
//!
//! let cache = CacheFacade::new(slot);
//! cache.put("greeting", "hello", 60).await?;
//! let greeting: String = cache.get("greeting").await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod codec;
pub mod facade;
mod guard;
pub mod selector;
pub mod slot;
pub mod traits;
pub mod ttl;

pub use codec::{decode, encode};
pub use facade::CacheFacade;
pub use selector::{BackendKind, BackendSelector, UnknownBackendKind};
pub use slot::{ActiveBackend, SharedBackend};
pub use traits::CacheService;
pub use ttl::ttl_from_seconds;
