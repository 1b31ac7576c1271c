#![allow(clippy::doc_markdown)] // Allow technical terms like Memcached, Dragonfly in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cache Facade
//!
//! Process-wide caching over interchangeable cache backends.
//!
//! ## Overview
//!
//! Application code stores and retrieves typed values by string key with an
//! optional time-to-live, without knowing which backend sits underneath. The
//! backend (a remote memory cache, a replicated key-value store, or an
//! in-process cache) is chosen from configuration at startup.
//!
//! ## Key Features
//!
//! - **Backend selection**: memcached, Redis/Dragonfly or Moka, picked by `cache.backend`
//! - **Typed values**: any serde type round-trips through a self-describing codec
//! - **Degraded mode**: a crashing backend client disables caching instead of
//!   taking the process down; callers see [`CacheError::NoBackend`]
//! - **Structured logging** through `tracing`
//!
//! ## Module Organization
//!
//! - [`cache`] - Facade, selector, codec, guard and backend clients
//! - [`global`] - Process-wide `initialize`/`put`/`get`/`delete`
//! - [`config`] - Configuration sources and loader
//! - [`error`] - Structured error handling
//! - [`logging`] - Subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! # async fn example() -> cache_facade::CacheResult<()> {
//! cache_facade::logging::init_structured_logging();
//! cache_facade::global::initialize().await;
//!
//! let user = User { id: 1, name: "ada".to_string() };
//! cache_facade::global::put("user:1", &user, 600).await?;
//! let cached: User = cache_facade::global::get("user:1").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib                        # Unit tests
//! cargo test                              # All tests
//! cargo test --features test-services     # Also hit live Redis / memcached
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod global;
pub mod logging;

pub use cache::{ActiveBackend, BackendKind, BackendSelector, CacheFacade, CacheService};
pub use config::{CacheConfigLoader, CacheSettings, ConfigSource};
pub use error::{BackendError, BackendResult, CacheError, CacheResult};
