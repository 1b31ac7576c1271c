//! Time-to-live conversion
//!
//! Callers pass ttl as signed seconds. Zero or negative means "no explicit
//! expiry", which each backend maps to its own default (memcached and Redis:
//! never expire; Moka: never expire).

use std::time::Duration;

/// Convert caller ttl seconds into an optional backend expiry
pub fn ttl_from_seconds(ttl_seconds: i64) -> Option<Duration> {
    u64::try_from(ttl_seconds)
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
