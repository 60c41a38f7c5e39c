//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`kv`] - Key-value backends (Redis and in-memory)
//! - [`persistence`] - Repositories built on top of a key-value backend

pub mod kv;
pub mod persistence;
