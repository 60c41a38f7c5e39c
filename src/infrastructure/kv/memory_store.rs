//! In-process key-value store for development and tests.

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn persistent(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expire_at: None,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|at| now >= at)
    }
}

/// A [`KeyValueStore`] held in a `DashMap`.
///
/// Mirrors the Redis semantics the service relies on: `SET` clears any expiry,
/// `INCR` keeps it, and expired keys read as absent. Expired entries are evicted
/// lazily when touched.
///
/// Nothing survives a restart, so this is only meant for local runs
/// (`STORE_BACKEND=memory`) and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live (non-expired) keys.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Utc::now();

        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .insert(key.to_string(), Entry::persistent(value));
        Ok(())
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let now = Utc::now();
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::persistent("0"));

        if entry.is_expired(now) {
            *entry = Entry::persistent("0");
        }

        let current: i64 = entry.value.parse().map_err(|_| {
            StoreError::Command("ERR value is not an integer or out of range".to_string())
        })?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::Command("ERR increment would overflow".to_string()))?;

        entry.value = next.to_string();
        Ok(next)
    }

    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> StoreResult<bool> {
        let now = Utc::now();

        match self.entries.get_mut(key) {
            Some(mut entry) if !entry.is_expired(now) => {
                entry.expire_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
