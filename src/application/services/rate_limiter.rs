//! Fixed-window per-client submission limiter.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::ClientQuota;
use crate::domain::repositories::QuotaRepository;
use crate::error::AppError;

/// Submissions allowed per client before the window resets.
pub const DEFAULT_DAILY_LIMIT: u64 = 100;

/// Counts submissions per client IP and refuses more than `limit` per window.
///
/// The window end is recomputed as "now + 24h" on every [`record`](Self::record),
/// so an active client keeps pushing its reset further out; the counter only
/// clears once the client has been quiet for a full day.
///
/// `check` and `record` are separate backend round trips. Two concurrent
/// submissions from one client can both pass `check` before either records,
/// so the limit can be overrun by the number of in-flight requests. The counter
/// itself never loses increments because `INCR` is atomic in the backend.
pub struct RateLimiter<Q: QuotaRepository> {
    quotas: Arc<Q>,
    limit: u64,
    window: Duration,
}

impl<Q: QuotaRepository> RateLimiter<Q> {
    /// Creates a limiter allowing `limit` submissions per 24h window.
    pub fn new(quotas: Arc<Q>, limit: u64) -> Self {
        Self {
            quotas,
            limit,
            window: Duration::hours(24),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns whether the client may submit: `count < limit`.
    ///
    /// A client without a counter has a count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] when the counter cannot be read. This is
    /// distinct from `Ok(false)`.
    pub async fn check(&self, client_ip: &str) -> Result<bool, AppError> {
        let count = self.quotas.current_count(client_ip).await?;
        Ok(count < self.limit)
    }

    /// Counts one submission and slides the window end to now + 24h.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure.
    pub async fn record(&self, client_ip: &str) -> Result<ClientQuota, AppError> {
        self.record_at(client_ip, Utc::now()).await
    }

    pub(crate) async fn record_at(
        &self,
        client_ip: &str,
        now: DateTime<Utc>,
    ) -> Result<ClientQuota, AppError> {
        self.quotas.increment(client_ip, now + self.window).await
    }
}
