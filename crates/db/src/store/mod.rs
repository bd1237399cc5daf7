//! The version store: the five operations the HTTP layer calls.
//!
//! Two backends implement [`VersionStore`]:
//!
//! - [`PgVersionStore`] keeps snapshots in PostgreSQL and resolves
//!   numbering races with a unique index plus a bounded retry.
//! - [`InMemoryVersionStore`] keeps snapshots in a lock-guarded vector,
//!   for local development and tests that have no database.
//!
//! Neither backend keeps a per-name counter. The next version number is
//! always derived from the stored snapshots at save time, so numbering
//! survives restarts and multiple server instances.

use async_trait::async_trait;
use versaver_core::error::CoreError;
use versaver_core::types::DbId;

use crate::models::version::{VersionPage, VersionRecord};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryVersionStore;
pub use postgres::PgVersionStore;

/// Entity label used in `CoreError::NotFound`.
pub const VERSION_ENTITY: &str = "Version";

/// Storage contract for versioned text snapshots.
///
/// Callers validate input before calling; implementations do not repeat
/// the non-empty checks. Errors are returned, never logged.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Store `content` as the next version of `name`.
    ///
    /// Concurrent saves for one name receive distinct, gap-free numbers.
    /// Fails with `ConflictRetryExhausted` if the race cannot be resolved
    /// within the attempt budget.
    async fn save_text(&self, content: &str, name: &str) -> Result<VersionRecord, CoreError>;

    /// Fetch one live version by id.
    async fn get_version(&self, id: DbId) -> Result<VersionRecord, CoreError>;

    /// Newest live version, restricted to `name` unless it is empty.
    ///
    /// Ties on `created_at` go to the highest id.
    async fn get_latest(&self, name: &str) -> Result<VersionRecord, CoreError>;

    /// Newest-first window of live versions plus the unwindowed total.
    ///
    /// `limit <= 0` selects the default page size; `offset <= 0` skips nothing.
    async fn list_versions(
        &self,
        name: &str,
        limit: i64,
        offset: i64,
    ) -> Result<VersionPage, CoreError>;

    /// Every distinct live name, ascending.
    async fn list_names(&self) -> Result<Vec<String>, CoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Map an empty name filter to "all names".
pub(crate) fn name_filter(name: &str) -> Option<&str> {
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
