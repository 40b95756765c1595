//! Route definitions for the apikit HTTP API.
//!
//! All routes are mounted under `/api`; anything else falls through to the
//! unknown-request handler.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes: Router<AppState> = Router::new()
        .route("/user", get(handlers::user::user))
        .route("/oauth/errors", get(handlers::oauth_errors::list));

    Router::new()
        .route("/api", get(handlers::index::index))
        .nest("/api", api_routes)
        .fallback(handlers::unknown::unknown)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}
