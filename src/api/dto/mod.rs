//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the existing wire contract (`expireAt`, `shortUrl`).

pub mod health;
pub mod shorten;
