//! Convenience result type alias for X-Flow.

use crate::error::AppError;

/// A specialized `Result` type for X-Flow operations.
pub type AppResult<T> = Result<T, AppError>;
