//! Builds an [`ApiController`] from the request parts.

use axum::extract::{FromRequestParts, OriginalUri, Query};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;

use apikit_auth::BasicCredentials;

use super::query::ApiQuery;
use crate::controller::{ApiController, RequestInput};
use crate::state::AppState;

impl FromRequestParts<AppState> for ApiController {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let query = ApiQuery::from_pairs(pairs);

        let basic = TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(auth)| BasicCredentials::new(auth.username(), auth.password()));

        // nested routers see a stripped URI
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let input = RequestInput {
            version: query.version(),
            method: parts.method.clone(),
            path,
            paging: query.paging(),
            access_token: query.access_token(),
            basic,
        };

        Ok(ApiController::new(state.clone(), input))
    }
}
