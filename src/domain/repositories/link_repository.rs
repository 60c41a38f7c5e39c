//! Repository trait for short link storage.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short link mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvLinkRepository`] - key-value backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores the mapping and schedules its deletion at `link.expire_at`.
    ///
    /// An existing mapping under the same id is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure.
    async fn save(&self, link: &ShortLink) -> Result<(), AppError>;

    /// Finds the target URL for an identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if never stored or already expired
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure.
    async fn find_target(&self, id: &str) -> Result<Option<String>, AppError>;
}
