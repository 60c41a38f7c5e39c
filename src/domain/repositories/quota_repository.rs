//! Repository trait for per-client submission counters.

use crate::domain::entities::ClientQuota;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for client quotas.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvQuotaRepository`] - key-value backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// Current submission count for a client. A missing counter reads as 0.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure or a non-numeric counter.
    async fn current_count(&self, client_ip: &str) -> Result<u64, AppError>;

    /// Atomically increments the counter, then moves its expiry to `window_expire_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure.
    async fn increment(
        &self,
        client_ip: &str,
        window_expire_at: DateTime<Utc>,
    ) -> Result<ClientQuota, AppError>;
}
