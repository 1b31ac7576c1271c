//! Degraded-mode guard
//!
//! Every backend call runs inside a fault boundary. A panic raised by the
//! backend client (a protocol-level crash inside a driver, not a returned
//! error) is caught, logged, and turns into [`CacheError::NoBackend`] for the
//! caller. The faulted backend is removed from the active slot, so every later
//! call short-circuits to `NoBackend` until the selector runs again. There is
//! no retry and no reconnection.

use super::slot::{ActiveBackend, SharedBackend};
use crate::error::{CacheError, CacheResult};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::error;

/// Run `call` against the active backend inside the fault boundary
///
/// Returns `NoBackend` without calling anything when the slot is empty.
pub(crate) async fn guarded<T, F, Fut>(
    slot: &ActiveBackend,
    operation: &'static str,
    key: &str,
    call: F,
) -> CacheResult<T>
where
    F: FnOnce(SharedBackend) -> Fut,
    Fut: Future<Output = T>,
{
    let backend = slot.current().ok_or(CacheError::NoBackend)?;
    let provider = backend.provider_name();

    let invocation = {
        let backend = Arc::clone(&backend);
        async move { call(backend).await }
    };

    match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(output) => Ok(output),
        Err(panic) => {
            let panic_msg = panic_message(panic.as_ref());
            error!(
                provider = provider,
                operation = operation,
                key = key,
                panic_msg = %panic_msg,
                "Cache backend fault intercepted"
            );

            if slot.clear_if_current(&backend) {
                error!(
                    provider = provider,
                    "Cache backend disabled after fault until re-initialization"
                );
            }

            Err(CacheError::NoBackend)
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
