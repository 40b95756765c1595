//! Catch-all for unmatched routes.

use axum::http::StatusCode;

use crate::controller::{ApiController, UNKNOWN_API_REQUEST};

/// Any method, any unmatched path.
pub async fn unknown(mut api: ApiController) -> ApiController {
    api.failure(UNKNOWN_API_REQUEST, "Unknown API Request", Some(StatusCode::BAD_REQUEST));
    api
}
