//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL until an absolute expiry.
///
/// `expire_at` is kept as raw text because the identifier is derived from it
/// verbatim; it is parsed as RFC 3339 by the service.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    pub expire_at: String,
}

/// Created short link.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: String,
    pub short_url: String,
}
