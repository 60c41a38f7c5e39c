//! Short link entity: an identifier mapped to a target URL until an absolute expiry.

use chrono::{DateTime, FixedOffset, Utc};

/// A stored short link.
///
/// `id` is derived from the target URL and the raw expiry text, so it is never
/// chosen independently. The backend deletes the mapping at `expire_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub target_url: String,
    pub expire_at: DateTime<FixedOffset>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: String, target_url: String, expire_at: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            target_url,
            expire_at,
        }
    }

    /// Expiry as a UTC instant, as handed to the backend.
    pub fn expire_at_utc(&self) -> DateTime<Utc> {
        self.expire_at.with_timezone(&Utc)
    }

    /// Returns true if the link has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at_utc() <= now
    }
}
