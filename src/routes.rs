//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/v1/urls` - Create a short link
//! - `GET  /health`      - Store health check
//! - `GET  /{*id}`       - Short link redirect
//!
//! No trailing-slash normalization is applied: identifiers are standard base64
//! and may themselves contain or end with `/`.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::api_routes())
        .route("/health", get(health_handler))
        .route("/{*id}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
