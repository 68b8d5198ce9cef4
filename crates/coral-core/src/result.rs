//! Convenience result type alias for Coral Console.

use crate::error::AppError;

/// A specialized `Result` type for Coral operations.
pub type AppResult<T> = Result<T, AppError>;
