//! Key-value implementation of quota repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::ClientQuota;
use crate::domain::repositories::QuotaRepository;
use crate::domain::store::{KeyValueStore, StoreError};
use crate::error::AppError;

const KEY_PREFIX: &str = "quota:";

/// Keeps one integer counter per client IP under `quota:<ip>`.
///
/// The prefix keeps counters out of the identifier namespace, where link keys
/// are stored bare.
pub struct KvQuotaRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvQuotaRepository {
    /// Creates a new repository on top of a key-value backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Backend key for a client's counter.
    pub fn key_for(client_ip: &str) -> String {
        format!("{}{}", KEY_PREFIX, client_ip)
    }
}

#[async_trait]
impl QuotaRepository for KvQuotaRepository {
    async fn current_count(&self, client_ip: &str) -> Result<u64, AppError> {
        let key = Self::key_for(client_ip);

        let Some(raw) = self.store.get(&key).await? else {
            return Ok(0);
        };

        let count = raw.trim().parse::<u64>().map_err(|e| StoreError::Corrupt {
            key: key.clone(),
            reason: e.to_string(),
        })?;

        Ok(count)
    }

    async fn increment(
        &self,
        client_ip: &str,
        window_expire_at: DateTime<Utc>,
    ) -> Result<ClientQuota, AppError> {
        let key = Self::key_for(client_ip);

        let count = self.store.incr(&key).await?;
        self.store.expire_at(&key, window_expire_at).await?;

        debug!(client_ip, count, "Recorded submission");

        Ok(ClientQuota::new(
            client_ip.to_string(),
            count.max(0) as u64,
            window_expire_at,
        ))
    }
}
