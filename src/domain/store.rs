//! Key-value backend contract.
//!
//! The service only needs five primitives from its backend. Anything that can
//! provide them (Redis, an in-memory map, a test double) can be injected as an
//! `Arc<dyn KeyValueStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store command error: {0}")]
    Command(String),

    #[error("corrupt value at key {key:?}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Result type for key-value operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Narrow key-value backend interface.
///
/// Semantics follow Redis:
///
/// - `set` stores a value with no expiry (any previous expiry is cleared)
/// - `incr` creates a missing key at 1 and is atomic
/// - `expire_at` schedules deletion at an absolute instant
///
/// # Implementations
///
/// - [`crate::infrastructure::kv::RedisStore`] - production backend
/// - [`crate::infrastructure::kv::MemoryStore`] - in-process map for development and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value at `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// `SET key value` without TTL.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// `INCR key`, returning the post-increment value.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// `PEXPIREAT key at` with millisecond precision. Returns `false` when the key does not exist.
    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> StoreResult<bool>;

    /// Liveness probe.
    async fn ping(&self) -> StoreResult<()>;
}
