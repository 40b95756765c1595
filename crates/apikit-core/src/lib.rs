//! # apikit-core
//!
//! Core crate for apikit. Contains capability traits, configuration schemas,
//! paging/sorting/account types, the URL, notification and validation
//! helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other apikit crates.

pub mod config;
pub mod error;
pub mod notifications;
pub mod result;
pub mod traits;
pub mod types;
pub mod urls;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
