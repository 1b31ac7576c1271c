//! Active backend slot
//!
//! The single shared handle to the currently selected backend client, or
//! nothing. Written by the selector and by the degraded-mode guard, read by
//! every facade call. Readers clone the `Arc` out and release the lock before
//! awaiting the backend, so a slow backend never blocks a writer.

use super::traits::CacheService;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to a backend client
pub type SharedBackend = Arc<dyn CacheService>;

/// Lock-guarded optional backend handle
#[derive(Default)]
pub struct ActiveBackend {
    backend: RwLock<Option<SharedBackend>>,
}

impl std::fmt::Debug for ActiveBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveBackend")
            .field("provider", &self.provider_name())
            .finish()
    }
}

impl ActiveBackend {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot already holding a backend
    pub fn with_backend(backend: SharedBackend) -> Self {
        Self {
            backend: RwLock::new(Some(backend)),
        }
    }

    /// Current backend, if any
    pub fn current(&self) -> Option<SharedBackend> {
        self.backend.read().clone()
    }

    /// Replace the slot contents, returning the previous backend
    pub fn replace(&self, backend: Option<SharedBackend>) -> Option<SharedBackend> {
        std::mem::replace(&mut *self.backend.write(), backend)
    }

    /// Install a backend
    pub fn install(&self, backend: SharedBackend) {
        self.replace(Some(backend));
    }

    /// Clear the slot unconditionally
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Clear the slot only if it still holds `expected`
    ///
    /// Returns `true` when the slot was cleared.
    pub fn clear_if_current(&self, expected: &SharedBackend) -> bool {
        let mut guard = self.backend.write();
        match guard.as_ref() {
            Some(current) if Arc::ptr_eq(current, expected) => {
                *guard = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.backend.read().is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.backend.read().as_ref().map(|b| b.provider_name())
    }
}
