//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Versioned API routes.
///
/// # Endpoints
///
/// - `POST /api/v1/urls` - Create a short link
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/api/v1/urls", post(shorten_handler))
}
