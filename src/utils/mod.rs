//! Helpers used across the application.
//!
//! - [`id_codec`] - Short link identifier derivation
//! - [`client_ip`] - Client IP resolution from headers and peer address

pub mod client_ip;
pub mod id_codec;
