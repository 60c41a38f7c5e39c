//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ClientIp;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link that expires at the given instant.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.google.com", "expireAt": "2021-07-18T16:58:30+08:00" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": "aHR0c6MDA=", "shortUrl": "http://localhost:8080/aHR0c6MDA=" }
/// ```
///
/// # Errors
///
/// - 500 if the body is not valid JSON or `expireAt` is not RFC 3339
/// - 400 if `url` is empty or `expireAt` is not in the future
/// - 401 if the client has used up its daily quota
/// - 500 on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .shorten_service
        .submit(&payload.url, &payload.expire_at, &client_ip)
        .await?;

    Ok(Json(ShortenResponse {
        id: created.link.id,
        short_url: created.short_url,
    }))
}
