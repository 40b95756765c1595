//! Route handlers.
//!
//! Every handler takes an [`ApiController`](crate::controller::ApiController),
//! fills it, and returns it to be rendered as the JSON envelope.

pub mod index;
pub mod oauth_errors;
pub mod unknown;
pub mod user;
