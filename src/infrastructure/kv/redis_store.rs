//! Redis-backed key-value store.

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::redis::{AsyncCommands, RedisResult};
use deadpool_redis::{Config, Connection, Pool, PoolConfig, PoolError, Runtime, Timeouts};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redis implementation of [`KeyValueStore`].
///
/// Connections come from a `deadpool-redis` pool of at most `pool_size`
/// connections. The configured timeout bounds waiting for a free connection,
/// opening a new one, recycling an idle one, and every command's response; an
/// elapsed timeout surfaces as [`StoreError::Timeout`].
pub struct RedisStore {
    pool: Pool,
    timeout: Duration,
}

fn map_pool_error(err: PoolError, timeout: Duration) -> StoreError {
    match err {
        PoolError::Timeout(_) => StoreError::Timeout(timeout),
        other => StoreError::Connection(format!("Failed to get Redis connection: {}", other)),
    }
}

/// Absolute expiry as sent to `PEXPIREAT`, keeping sub-second precision.
fn unix_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

impl RedisStore {
    /// Builds the connection pool and validates it with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://:secret@localhost:6379/0"`)
    /// - `pool_size` - maximum number of pooled connections (at least one)
    /// - `timeout` - bound applied to connection checkout and to each command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or a connection cannot
    /// be established, [`StoreError::Timeout`] if connecting takes too long, and any
    /// error from the PING liveness check.
    pub async fn connect(redis_url: &str, pool_size: usize, timeout: Duration) -> StoreResult<Self> {
        let pool_size = pool_size.max(1);
        info!(pool_size, timeout_ms = timeout.as_millis() as u64, "Connecting to Redis");

        let mut timeouts = Timeouts::new();
        timeouts.wait = Some(timeout);
        timeouts.create = Some(timeout);
        timeouts.recycle = Some(timeout);

        let mut pool_config = PoolConfig::new(pool_size);
        pool_config.timeouts = timeouts;

        let mut config = Config::from_url(redis_url);
        config.pool = Some(pool_config);

        let pool = config.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis pool: {}", e))
        })?;

        let store = Self { pool, timeout };

        store.ping().await?;
        info!("Connected to Redis");

        Ok(store)
    }

    async fn connection(&self) -> StoreResult<Connection> {
        self.pool.get().await.map_err(|e| {
            warn!(error = %e, "Failed to get connection from Redis pool");
            map_pool_error(e, self.timeout)
        })
    }

    async fn run<T, F>(&self, command: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(command, error = %e, "Redis command failed");
                Err(StoreError::Command(format!("{} failed: {}", command, e)))
            }
            Err(_) => {
                warn!(command, "Redis command timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value = self.run("GET", conn.get::<_, Option<String>>(key)).await?;

        match &value {
            Some(_) => debug!("Redis GET hit: {}", key),
            None => debug!("Redis GET miss: {}", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        self.run("SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.connection().await?;
        self.run("INCR", conn.incr::<_, _, i64>(key, 1)).await
    }

    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        self.run("PEXPIREAT", conn.pexpire_at::<_, bool>(key, unix_millis(at)))
            .await
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let cmd = deadpool_redis::redis::cmd("PING");
        let pong = self.run("PING", cmd.query_async::<String>(&mut conn)).await?;
        debug!("Redis PING -> {}", pong);
        Ok(())
    }
}
