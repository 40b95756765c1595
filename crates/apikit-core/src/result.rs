//! Convenience result type alias for apikit.

use crate::error::AppError;

/// A specialized `Result` type for apikit operations.
pub type AppResult<T> = Result<T, AppError>;
