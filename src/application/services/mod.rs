//! Business logic services for the application layer.

pub mod rate_limiter;
pub mod shorten_service;

pub use rate_limiter::{DEFAULT_DAILY_LIMIT, RateLimiter};
pub use shorten_service::{ShortenService, ShortenedLink};
