//! PostgreSQL-backed [`VersionStore`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use versaver_core::error::CoreError;
use versaver_core::types::DbId;
use versaver_core::versioning::{effective_limit, effective_offset, DEFAULT_MAX_SAVE_ATTEMPTS};

use super::{name_filter, VersionStore, VERSION_ENTITY};
use crate::models::version::{VersionPage, VersionRecord};
use crate::repositories::VersionRepo;
use crate::DbPool;

/// Default upper bound on a single store call, retries included.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(10);

/// Version store over a PostgreSQL pool.
///
/// Saves rely on the partial unique index `uq_versions_name_version_num`:
/// the insert computes `MAX(version_num) + 1` for the name, and when two
/// saves compute the same number the later one fails on the index and is
/// re-run against the now-committed state.
#[derive(Clone)]
pub struct PgVersionStore {
    pool: DbPool,
    max_save_attempts: u32,
    op_timeout: Duration,
}

impl PgVersionStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            max_save_attempts: DEFAULT_MAX_SAVE_ATTEMPTS,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Override how many inserts a save may attempt (at least one).
    pub fn with_max_save_attempts(mut self, attempts: u32) -> Self {
        self.max_save_attempts = attempts.max(1);
        self
    }

    /// Override the per-call timeout.
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Run a storage future under the per-call timeout.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .unwrap_or_else(|_| Err(timed_out(self.op_timeout)))
    }
}

fn persistence(err: sqlx::Error) -> CoreError {
    CoreError::Persistence(err.to_string())
}

fn timed_out(after: Duration) -> CoreError {
    CoreError::Persistence(format!(
        "storage call timed out after {}ms",
        after.as_millis()
    ))
}

#[async_trait]
impl VersionStore for PgVersionStore {
    #[tracing::instrument(skip_all, fields(name = %name))]
    async fn save_text(&self, content: &str, name: &str) -> Result<VersionRecord, CoreError> {
        let attempts = self.max_save_attempts;
        self.bounded(async {
            for _ in 0..attempts {
                match VersionRepo::insert_next(&self.pool, name, content).await {
                    Ok(version) => return Ok(version),
                    Err(e) if VersionRepo::is_version_conflict(&e) => {
                        tokio::task::yield_now().await;
                    }
                    Err(e) => return Err(persistence(e)),
                }
            }
            Err(CoreError::ConflictRetryExhausted {
                name: name.to_string(),
                attempts,
            })
        })
        .await
    }

    async fn get_version(&self, id: DbId) -> Result<VersionRecord, CoreError> {
        self.bounded(async {
            VersionRepo::find_by_id(&self.pool, id)
                .await
                .map_err(persistence)?
                .ok_or(CoreError::NotFound {
                    entity: VERSION_ENTITY,
                    id,
                })
        })
        .await
    }

    async fn get_latest(&self, name: &str) -> Result<VersionRecord, CoreError> {
        self.bounded(async {
            VersionRepo::find_latest(&self.pool, name_filter(name))
                .await
                .map_err(persistence)?
                .ok_or_else(|| CoreError::NoVersions {
                    name: name.to_string(),
                })
        })
        .await
    }

    async fn list_versions(
        &self,
        name: &str,
        limit: i64,
        offset: i64,
    ) -> Result<VersionPage, CoreError> {
        let limit = effective_limit(limit);
        let offset = effective_offset(offset);
        let filter = name_filter(name);

        self.bounded(async {
            let total = VersionRepo::count(&self.pool, filter)
                .await
                .map_err(persistence)?;
            let records = VersionRepo::list(&self.pool, filter, limit, offset)
                .await
                .map_err(persistence)?;
            Ok(VersionPage {
                records,
                total,
                limit,
                offset,
            })
        })
        .await
    }

    async fn list_names(&self) -> Result<Vec<String>, CoreError> {
        self.bounded(async { VersionRepo::list_names(&self.pool).await.map_err(persistence) })
            .await
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        self.bounded(async { crate::health_check(&self.pool).await.map_err(persistence) })
            .await
    }
}
