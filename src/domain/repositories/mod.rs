//! Repository trait definitions for the domain layer.
//!
//! Repositories translate domain operations into key-value commands. The traits
//! live here; implementations live in `crate::infrastructure::persistence`, and
//! mock implementations are generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - short link mappings
//! - [`QuotaRepository`] - per-client submission counters

pub mod link_repository;
pub mod quota_repository;

pub use link_repository::LinkRepository;
pub use quota_repository::QuotaRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use quota_repository::MockQuotaRepository;
