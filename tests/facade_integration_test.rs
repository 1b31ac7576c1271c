//! End-to-end facade behavior against the in-process backend and test doubles

mod common;

use cache_facade::{ActiveBackend, BackendSelector, CacheError, CacheFacade, CacheService};
use common::{config, moka_config, CrashingBackend, RefusingBackend};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u64,
    items: Vec<String>,
    totals: BTreeMap<String, f64>,
    note: Option<String>,
}

fn sample_order() -> Order {
    Order {
        id: 1001,
        items: vec!["widget".to_string(), "gadget".to_string()],
        totals: BTreeMap::from([("net".to_string(), 19.5), ("tax".to_string(), 1.95)]),
        note: None,
    }
}

async fn moka_facade() -> CacheFacade {
    let facade = CacheFacade::default();
    BackendSelector::new(facade.slot().clone())
        .initialize(&moka_config())
        .await;
    assert_eq!(facade.provider_name(), Some("moka"));
    facade
}

#[tokio::test]
async fn test_operations_before_initialize_return_no_backend() {
    let facade = CacheFacade::default();

    assert_eq!(
        facade.put("order:1", &sample_order(), 60).await,
        Err(CacheError::NoBackend)
    );
    assert_eq!(
        facade.get::<Order>("order:1").await,
        Err(CacheError::NoBackend)
    );
    assert_eq!(facade.delete("order:1").await, Err(CacheError::NoBackend));
}

#[tokio::test]
async fn test_put_then_get_returns_value() {
    let facade = moka_facade().await;
    let order = sample_order();

    facade.put("order:1001", &order, 60).await.unwrap();
    assert_eq!(facade.get::<Order>("order:1001").await.unwrap(), order);
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let facade = moka_facade().await;

    facade.put("counter", &1_u32, 60).await.unwrap();
    facade.put("counter", &2_u32, 60).await.unwrap();
    assert_eq!(facade.get::<u32>("counter").await.unwrap(), 2);
}

#[tokio::test]
async fn test_never_written_key_is_not_found() {
    let facade = moka_facade().await;

    let err = facade.get::<Order>("order:missing").await.unwrap_err();
    assert_eq!(
        err,
        CacheError::KeyNotFound {
            key: "order:missing".to_string()
        }
    );
}

#[tokio::test]
async fn test_expired_entry_is_not_found() {
    let facade = moka_facade().await;

    facade.put("short-lived", "value", 1).await.unwrap();
    assert_eq!(facade.get::<String>("short-lived").await.unwrap(), "value");

    tokio::time::sleep(Duration::from_millis(1300)).await;
    assert!(facade
        .get::<String>("short-lived")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_non_positive_ttl_does_not_expire() {
    let facade = moka_facade().await;

    facade.put("zero", "kept", 0).await.unwrap();
    facade.put("negative", "kept", -1).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(facade.get::<String>("zero").await.unwrap(), "kept");
    assert_eq!(facade.get::<String>("negative").await.unwrap(), "kept");
}

#[tokio::test]
async fn test_delete_existing_and_missing() {
    let facade = moka_facade().await;

    facade.put("order:1001", &sample_order(), 60).await.unwrap();
    facade.delete("order:1001").await.unwrap();
    assert!(facade
        .get::<Order>("order:1001")
        .await
        .unwrap_err()
        .is_not_found());

    facade.delete("order:never").await.unwrap();
}

#[tokio::test]
async fn test_shape_mismatch_is_decoding_error() {
    let facade = moka_facade().await;

    facade.put("order:1001", &sample_order(), 60).await.unwrap();
    assert!(matches!(
        facade.get::<Vec<u32>>("order:1001").await,
        Err(CacheError::Decoding(_))
    ));
}

#[tokio::test]
async fn test_backend_fault_disables_cache_until_reinitialized() {
    let crashing = Arc::new(CrashingBackend::new("poison"));
    let slot = Arc::new(ActiveBackend::with_backend(crashing.clone()));
    let facade = CacheFacade::new(slot.clone());

    facade.put("healthy", &1, 60).await.unwrap();
    assert_eq!(
        facade.get::<i32>("poison").await,
        Err(CacheError::NoBackend)
    );
    assert!(!facade.is_available());
    let calls_at_fault = crashing.calls();

    // every later call, on any key, short-circuits
    assert_eq!(facade.put("other", &2, 60).await, Err(CacheError::NoBackend));
    assert_eq!(facade.get::<i32>("other").await, Err(CacheError::NoBackend));
    assert_eq!(facade.delete("other").await, Err(CacheError::NoBackend));
    assert_eq!(crashing.calls(), calls_at_fault);

    BackendSelector::new(slot).initialize(&moka_config()).await;
    facade.put("other", &2, 60).await.unwrap();
    assert_eq!(facade.get::<i32>("other").await.unwrap(), 2);
}

#[tokio::test]
async fn test_fault_is_seen_by_concurrent_callers() {
    let slot = Arc::new(ActiveBackend::with_backend(Arc::new(CrashingBackend::new(
        "poison",
    ))));
    let facade = CacheFacade::new(slot);

    let mut handles = Vec::new();
    for i in 0..8 {
        let facade = facade.clone();
        handles.push(tokio::spawn(async move {
            facade.get::<i32>(&format!("key:{i}")).await
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(matches!(
            result,
            Err(CacheError::KeyNotFound { .. }) | Err(CacheError::NoBackend)
        ));
    }

    assert_eq!(facade.get::<i32>("poison").await, Err(CacheError::NoBackend));
    for i in 0..8 {
        assert_eq!(
            facade.get::<i32>(&format!("key:{i}")).await,
            Err(CacheError::NoBackend)
        );
    }
}

#[tokio::test]
async fn test_backend_errors_keep_backend_installed() {
    let facade = CacheFacade::new(Arc::new(ActiveBackend::with_backend(Arc::new(
        RefusingBackend,
    ))));

    assert!(matches!(
        facade.put("k", &1, 60).await,
        Err(CacheError::BackendWrite { .. })
    ));
    assert!(matches!(
        facade.get::<i32>("k").await,
        Err(CacheError::BackendRead { .. })
    ));
    assert!(matches!(
        facade.delete("k").await,
        Err(CacheError::BackendDelete { .. })
    ));
    assert_eq!(facade.health_check().await, Ok(false));
    assert_eq!(facade.provider_name(), Some("refusing"));
}

#[tokio::test]
async fn test_unrecognized_kind_selects_remote_memory_cache() {
    let facade = CacheFacade::default();
    let selector = BackendSelector::new(facade.slot().clone());

    // no memcache_host configured: the fallback kind cannot be built
    selector
        .initialize(&config(&[
            ("cache.backend", "riak"),
            ("cache.redis_host", "localhost:6379"),
        ]))
        .await;
    assert!(!facade.is_available());
    assert_eq!(facade.get::<i32>("k").await, Err(CacheError::NoBackend));
}

#[tokio::test]
async fn test_failed_reinitialize_leaves_cache_disabled() {
    let facade = moka_facade().await;
    facade.put("k", &1, 60).await.unwrap();

    BackendSelector::new(facade.slot().clone())
        .initialize(&config(&[("cache.backend", "redis")]))
        .await;

    assert_eq!(facade.get::<i32>("k").await, Err(CacheError::NoBackend));
}

#[tokio::test]
async fn test_custom_backend_can_be_installed_directly() {
    let facade = CacheFacade::default();
    let backend: Arc<dyn CacheService> = Arc::new(RefusingBackend);
    facade.slot().install(backend);

    assert!(facade.is_available());
    assert_eq!(facade.provider_name(), Some("refusing"));
}
