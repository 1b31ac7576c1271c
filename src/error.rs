//! Cache error types
//!
//! `CacheError` is what callers of the facade see. `BackendError` is what a
//! backend client reports to the facade; the facade decides which caller-facing
//! variant it becomes.

use thiserror::Error;

/// Errors returned by facade operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// No active backend: never initialized, construction failed, or disabled
    /// by an intercepted backend fault
    #[error("No cache backend available")]
    NoBackend,

    /// Value could not be serialized
    #[error("Cache encoding error: {0}")]
    Encoding(String),

    /// Stored bytes are incompatible with the requested type
    #[error("Cache decoding error: {0}")]
    Decoding(String),

    /// No entry exists for the key (never written, expired, or deleted)
    #[error("Cache entry not found: {key}")]
    KeyNotFound { key: String },

    /// Key rejected before reaching the backend
    #[error("Invalid cache key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Backend reported a failure while storing
    #[error("Cache write failed for key '{key}': {message}")]
    BackendWrite { key: String, message: String },

    /// Backend reported a failure while reading
    #[error("Cache read failed for key '{key}': {message}")]
    BackendRead { key: String, message: String },

    /// Backend reported a failure while deleting
    #[error("Cache delete failed for key '{key}'")]
    BackendDelete { key: String, message: String },
}

impl CacheError {
    /// True for the degraded-mode class of errors
    pub fn is_no_backend(&self) -> bool {
        matches!(self, Self::NoBackend)
    }

    /// True when the entry simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

/// Result type for facade operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors reported by backend clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Failed to create or reach the backend
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Backend rejected or failed an operation
    #[error("Cache backend error: {0}")]
    Operation(String),
}

/// Result type for backend client operations
pub type BackendResult<T> = Result<T, BackendError>;
