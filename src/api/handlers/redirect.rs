//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an identifier to its target URL.
///
/// # Endpoint
///
/// `GET /{*id}`
///
/// The route is a catch-all because identifiers are standard base64 and may
/// contain `/`.
///
/// # Errors
///
/// Returns 404 Not Found when the identifier is unknown, expired, or cannot
/// be looked up.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let target = state.shorten_service.resolve(&id).await?;

    debug!(id = %id, target = %target, "Redirecting");
    Ok(Redirect::permanent(&target))
}
