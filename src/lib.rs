//! # tinylink
//!
//! A small URL shortening service built with Axum and Redis.
//!
//! Clients submit a target URL with an absolute expiry and receive a short
//! identifier; `GET /{id}` redirects to the target until the expiry passes, at
//! which point the backend drops the mapping. Each client IP may submit a
//! bounded number of links per day.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits and the key-value store contract
//! - **Application Layer** ([`application`]) - Submission, resolution and rate limiting
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores, repositories
//! - **API Layer** ([`api`]) - Handlers, DTOs, extractors and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! cargo run
//!
//! curl -X POST localhost:8080/api/v1/urls \
//!   -H 'content-type: application/json' \
//!   -d '{"url":"https://www.google.com","expireAt":"2030-01-01T00:00:00Z"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;
