//! In-memory [`VersionStore`] for development and database-free tests.
//!
//! All snapshots live in one vector behind a `tokio` `RwLock`. A save holds
//! the write lock while it derives the next number and appends, so writers
//! are serialized across all names. Contents are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use versaver_core::error::CoreError;
use versaver_core::types::DbId;
use versaver_core::versioning::{effective_limit, effective_offset, next_version_number};

use super::{name_filter, VersionStore, VERSION_ENTITY};
use crate::models::version::{VersionPage, VersionRecord};

#[derive(Default)]
pub struct InMemoryVersionStore {
    records: RwLock<Vec<VersionRecord>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing snapshots (fixtures, imports).
    ///
    /// New ids continue after the highest seeded id.
    pub fn from_records(records: Vec<VersionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn is_live(record: &VersionRecord, name: Option<&str>) -> bool {
    record.deleted_at.is_none() && name.map_or(true, |n| record.name == n)
}

/// Newest first; equal timestamps go to the higher id.
fn newest_first(a: &VersionRecord, b: &VersionRecord) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn save_text(&self, content: &str, name: &str) -> Result<VersionRecord, CoreError> {
        let mut records = self.records.write().await;

        let version_num = next_version_number(
            records
                .iter()
                .filter(|r| is_live(r, Some(name)))
                .map(|r| r.version_num),
        );
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let now = Utc::now();

        let record = VersionRecord {
            id,
            name: name.to_string(),
            version_num,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            content: content.to_string(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn get_version(&self, id: DbId) -> Result<VersionRecord, CoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: VERSION_ENTITY,
                id,
            })
    }

    async fn get_latest(&self, name: &str) -> Result<VersionRecord, CoreError> {
        let filter = name_filter(name);
        self.records
            .read()
            .await
            .iter()
            .filter(|r| is_live(r, filter))
            .min_by(|a, b| newest_first(a, b))
            .cloned()
            .ok_or_else(|| CoreError::NoVersions {
                name: name.to_string(),
            })
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

        let mut matching: Vec<VersionRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| is_live(r, filter))
            .cloned()
            .collect();
        matching.sort_by(newest_first);

        let total = matching.len() as i64;
        let records = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(VersionPage {
            records,
            total,
            limit,
            offset,
        })
    }

    async fn list_names(&self) -> Result<Vec<String>, CoreError> {
        let mut names: Vec<String> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.deleted_at.is_none())
            .map(|r| r.name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}
