//! Response bodies for the version endpoints.
//!
//! Single records are returned bare; collections get a named wrapper so
//! clients can read `versions` / `names` directly.

use serde::Serialize;
use versaver_db::models::version::{VersionPage, VersionRecord};

/// `GET /versions` body: one window plus the unwindowed total.
#[derive(Debug, Serialize)]
pub struct VersionListResponse {
    pub versions: Vec<VersionRecord>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl From<VersionPage> for VersionListResponse {
    fn from(page: VersionPage) -> Self {
        Self {
            versions: page.records,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// `GET /names` body.
#[derive(Debug, Serialize)]
pub struct NamesResponse {
    pub names: Vec<String>,
}
