//! Result alias shared by every ITAM crate.

use crate::error::AppError;

/// Outcome of a store, transport or configuration operation.
pub type AppResult<T> = Result<T, AppError>;
