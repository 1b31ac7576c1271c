//! Shared test backends and configuration helpers

#![allow(dead_code)]

use async_trait::async_trait;
use cache_facade::{BackendError, BackendResult, CacheService};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Configuration map with the given `cache.*` pairs
pub fn config(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Configuration selecting the in-process backend
pub fn moka_config() -> HashMap<String, String> {
    config(&[("cache.backend", "moka"), ("cache.moka_max_capacity", "1000")])
}

/// Backend whose client crashes on `get` for one poisoned key
///
/// Every other call succeeds without storing anything. Counts how often it
/// was reached so tests can prove later calls never touch it.
#[derive(Debug)]
pub struct CrashingBackend {
    poisoned_key: &'static str,
    calls: AtomicUsize,
}

impl CrashingBackend {
    pub fn new(poisoned_key: &'static str) -> Self {
        Self {
            poisoned_key,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheService for CrashingBackend {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if key == self.poisoned_key {
            panic!("connection state corrupted while reading '{key}'");
        }
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, _key: &str) -> BackendResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    async fn health_check(&self) -> BackendResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "crashing"
    }
}

/// Backend that reports every operation as failed
#[derive(Debug, Default)]
pub struct RefusingBackend;

#[async_trait]
impl CacheService for RefusingBackend {
    async fn get(&self, _key: &str) -> BackendResult<Option<Vec<u8>>> {
        Err(BackendError::Operation("server busy".to_string()))
    }

    async fn put(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> BackendResult<()> {
        Err(BackendError::Operation("out of memory".to_string()))
    }

    async fn delete(&self, _key: &str) -> BackendResult<bool> {
        Err(BackendError::Operation("server busy".to_string()))
    }

    async fn health_check(&self) -> BackendResult<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &'static str {
        "refusing"
    }
}
