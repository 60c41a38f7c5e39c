//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`store`] - The key-value backend interface repositories are built on
//!
//! The domain layer has no dependency on a concrete backend. Business rules live
//! in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod store;
