//! # apikit-api
//!
//! HTTP API layer for apikit built on Axum.
//!
//! Every response is the same JSON envelope (`service`, `api`, `method`,
//! `time`, data, OAuth `error`, business `errors`) with deterministic cache,
//! CORS and ETag headers. List endpoints page their results on request.

pub mod app;
pub mod controller;
pub mod envelope;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod oauth;
pub mod paging;
pub mod response;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use controller::ApiController;
pub use state::AppState;
