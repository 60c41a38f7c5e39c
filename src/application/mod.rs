//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide the operations HTTP handlers
//! and the admin CLI call into.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short link submission and resolution
//! - [`services::rate_limiter::RateLimiter`] - Per-client daily submission quota

pub mod services;
