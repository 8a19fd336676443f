//! Database query helper functions to reduce boilerplate error handling.
//!
//! These helpers simplify common patterns like:
//! - Fetching a required record (NotFound if missing)
//! - Ensuring a record doesn't exist (Conflict if it does)
//!
//! # Usage
//!
//! ```ignore
//! let fighter = require_record(queries.find_detail(id).await, "fighter not found")?;
//! ```

use crate::error::ApiError;

/// Result type for handlers that turn database outcomes into HTTP errors
pub type DbResult<T> = Result<T, ApiError>;

/// Unwrap an optional database result, returning NotFound if None.
///
/// # Example
/// ```ignore
/// let event = require_record(
///     EventQueries::new(pool).find(event_id).await,
///     "event not found."
/// )?;
/// ```
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> DbResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ApiError::not_found(not_found_message)),
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// Ensure a record does NOT exist, returning Conflict if it does.
///
/// # Example
/// ```ignore
/// ensure_not_exists(
///     UserQueries::find_id_by_username(&mut *tx, &name).await,
///     "username already taken"
/// )?;
/// ```
pub fn ensure_not_exists<T>(
    result: Result<Option<T>, sqlx::Error>,
    conflict_message: &str,
) -> DbResult<()> {
    match result {
        Ok(Some(_)) => Err(ApiError::conflict(conflict_message)),
        Ok(None) => Ok(()),
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// Require that a write touched at least one row, otherwise report an internal error.
/// The caller's transaction is dropped uncommitted, which rolls it back.
pub fn require_rows_affected(rows_affected: u64, failure_message: &str) -> DbResult<()> {
    if rows_affected == 0 {
        return Err(ApiError::Internal(failure_message.to_string()));
    }
    Ok(())
}
