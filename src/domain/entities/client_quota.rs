//! Per-client submission counter.

use chrono::{DateTime, Utc};

/// Submission count for one client IP within the current window.
///
/// The window end is pushed to "now + 24h" on every recorded submission, and the
/// backend drops the counter once it passes, which resets the count to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuota {
    pub client_ip: String,
    pub count: u64,
    pub window_expire_at: DateTime<Utc>,
}

impl ClientQuota {
    /// Creates a new ClientQuota instance.
    pub fn new(client_ip: String, count: u64, window_expire_at: DateTime<Utc>) -> Self {
        Self {
            client_ip,
            count,
            window_expire_at,
        }
    }
}
