//! Core domain entities.
//!
//! - [`ShortLink`] - identifier to target URL mapping with an absolute expiry
//! - [`ClientQuota`] - per-client submission counter for the daily window

pub mod client_quota;
pub mod short_link;

pub use client_quota::ClientQuota;
pub use short_link::ShortLink;
