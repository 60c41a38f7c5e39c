//! Key-value store backends.
//!
//! Provides two [`crate::domain::store::KeyValueStore`] implementations:
//! - [`RedisStore`] - Production Redis backend with a bounded connection pool
//! - [`MemoryStore`] - In-process map for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
