//! Convenience result type alias for Remindes.

use crate::error::AppError;

/// A specialized `Result` type for Remindes operations.
pub type AppResult<T> = Result<T, AppError>;
