//! Repository for the `versions` table.
//!
//! Every read excludes soft-deleted rows. An empty `name` filter is passed
//! as `None` and matches every name.

use sqlx::PgPool;
use versaver_core::types::DbId;
use versaver_core::versioning::VERSION_NUM_CONSTRAINT;

use crate::models::version::VersionRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, version_num, created_at, updated_at, deleted_at, content";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Provides the insert and read queries behind the version store.
pub struct VersionRepo;

impl VersionRepo {
    /// Insert a snapshot numbered one past the highest live version for `name`.
    ///
    /// The number is derived inside the insert statement itself. Two
    /// concurrent inserts can still compute the same number; the second one
    /// fails on `uq_versions_name_version_num` (see [`Self::is_version_conflict`]).
    pub async fn insert_next(
        pool: &PgPool,
        name: &str,
        content: &str,
    ) -> Result<VersionRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO versions (name, version_num, content)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(version_num), 0) + 1
                   FROM versions WHERE name = $1 AND deleted_at IS NULL),
                $2
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VersionRecord>(&query)
            .bind(name)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find a version by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VersionRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM versions WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, VersionRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently created version, optionally restricted to one name.
    ///
    /// Rows sharing a `created_at` are ordered by `id`, so the highest id wins.
    pub async fn find_latest(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Option<VersionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions
             WHERE deleted_at IS NULL AND ($1::text IS NULL OR name = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, VersionRecord>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// One window of versions, newest first.
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VersionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions
             WHERE deleted_at IS NULL AND ($1::text IS NULL OR name = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, VersionRecord>(&query)
            .bind(name)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count every live version matching the name filter.
    pub async fn count(pool: &PgPool, name: Option<&str>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM versions \
             WHERE deleted_at IS NULL AND ($1::text IS NULL OR name = $1)",
        )
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Distinct live names in byte-wise ascending order.
    pub async fn list_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM versions WHERE deleted_at IS NULL \
             GROUP BY name ORDER BY name COLLATE \"C\"",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Whether `err` is a lost race on `(name, version_num)`.
    ///
    /// Unique violations on any other constraint are not retryable.
    pub fn is_version_conflict(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                    && db_err.constraint() == Some(VERSION_NUM_CONSTRAINT)
            }
            _ => false,
        }
    }
}
