//! Version snapshot entity model.

use serde::Serialize;
use sqlx::FromRow;
use versaver_core::types::{DbId, Timestamp};

/// A row from the `versions` table: one immutable text snapshot.
///
/// Field order matches the JSON shape clients expect. `deleted_at` is
/// never serialized; soft-deleted rows are filtered out before they reach
/// a response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VersionRecord {
    pub id: DbId,
    pub name: String,
    /// 1-based position of this snapshot among the saves for `name`.
    pub version_num: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub content: String,
}

/// One window of a version listing.
#[derive(Debug, Clone)]
pub struct VersionPage {
    /// Records in the window, newest first.
    pub records: Vec<VersionRecord>,
    /// Count of every matching record, ignoring the window.
    pub total: i64,
    /// Effective page size applied.
    pub limit: i64,
    /// Effective offset applied.
    pub offset: i64,
}
