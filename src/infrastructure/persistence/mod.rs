//! Repository implementations backed by a key-value store.
//!
//! # Repositories
//!
//! - [`KvLinkRepository`] - short link mappings with absolute expiry
//! - [`KvQuotaRepository`] - per-client submission counters

pub mod kv_link_repository;
pub mod kv_quota_repository;

pub use kv_link_repository::KvLinkRepository;
pub use kv_quota_repository::KvQuotaRepository;
