//! Custom Axum extractors.

pub mod controller;
pub mod query;

pub use query::ApiQuery;
