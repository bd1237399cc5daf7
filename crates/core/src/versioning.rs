//! Version numbering and pagination rules.
//!
//! This module lives in `core` (zero internal deps) so both storage
//! backends and the HTTP gateway apply the same rules.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page size used when the caller passes no limit (or a non-positive one).
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound on a single page.
pub const MAX_LIST_LIMIT: i64 = 1000;

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Default number of insert attempts before a save gives up on a contended name.
pub const DEFAULT_MAX_SAVE_ATTEMPTS: u32 = 16;

/// Name of the unique index guarding `(name, version_num)`.
pub const VERSION_NUM_CONSTRAINT: &str = "uq_versions_name_version_num";

/// Next version number given the numbers already stored for a name.
///
/// Returns 1 for a name with no versions.
pub fn next_version_number<I>(existing: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    existing.into_iter().max().unwrap_or(0) + 1
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a snapshot name (must be non-empty).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }
    Ok(())
}

/// Validate snapshot content (must be non-empty; stored verbatim otherwise).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation("content is required".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Window normalization
// ---------------------------------------------------------------------------

/// Effective page size: non-positive means the default, large values are capped.
pub fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIST_LIMIT
    } else {
        limit.min(MAX_LIST_LIMIT)
    }
}

/// Effective offset: non-positive means no skip.
pub fn effective_offset(offset: i64) -> i64 {
    offset.max(0)
}

/// Parse a raw `limit` query value. Missing, non-numeric and negative
/// values all fall back to [`DEFAULT_LIST_LIMIT`].
pub fn parse_limit_param(raw: Option<&str>) -> i64 {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 0 => n,
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Parse a raw `offset` query value. Missing, non-numeric and negative
/// values all fall back to 0.
pub fn parse_offset_param(raw: Option<&str>) -> i64 {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 0 => n,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
