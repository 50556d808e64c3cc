//! Pagination defaults and window arithmetic for list endpoints.
//!
//! `limit` has no upper bound: a caller asking for more rows than exist
//! simply receives the remainder.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the caller does not supply `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Starting offset used when the caller does not supply `offset`.
pub const DEFAULT_OFFSET: i64 = 0;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a caller-supplied `limit`, falling back to [`DEFAULT_LIMIT`].
///
/// Zero is allowed and yields an empty page. Negative values are rejected.
pub fn resolve_limit(limit: Option<i64>) -> Result<i64, CoreError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 0 {
        return Err(CoreError::Validation(format!(
            "limit must not be negative (got {limit})"
        )));
    }
    Ok(limit)
}

/// Resolve a caller-supplied `offset`, falling back to [`DEFAULT_OFFSET`].
pub fn resolve_offset(offset: Option<i64>) -> Result<i64, CoreError> {
    let offset = offset.unwrap_or(DEFAULT_OFFSET);
    if offset < 0 {
        return Err(CoreError::Validation(format!(
            "offset must not be negative (got {offset})"
        )));
    }
    Ok(offset)
}

/// Number of rows a `(limit, offset)` window holds over `total` rows.
///
/// Equals `min(limit, max(0, total - offset))`.
pub fn window_len(total: i64, limit: i64, offset: i64) -> i64 {
    total.saturating_sub(offset).max(0).min(limit.max(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
