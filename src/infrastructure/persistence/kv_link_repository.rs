//! Key-value implementation of link repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::LinkRepository;
use crate::domain::store::KeyValueStore;
use crate::error::AppError;

/// Stores each link as `SET <id> <target_url>` followed by `PEXPIREAT <id> <expire_at in ms>`.
///
/// Keys are the bare identifiers so that mappings written by earlier deployments
/// stay resolvable.
pub struct KvLinkRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvLinkRepository {
    /// Creates a new repository on top of a key-value backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LinkRepository for KvLinkRepository {
    async fn save(&self, link: &ShortLink) -> Result<(), AppError> {
        self.store.set(&link.id, &link.target_url).await?;
        self.store.expire_at(&link.id, link.expire_at_utc()).await?;

        debug!(id = %link.id, expire_at = %link.expire_at, "Saved short link");
        Ok(())
    }

    async fn find_target(&self, id: &str) -> Result<Option<String>, AppError> {
        Ok(self.store.get(id).await?)
    }
}
