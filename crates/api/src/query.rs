//! Query parameter types for the version endpoints.
//!
//! Numeric parameters are taken as raw strings so that malformed values
//! fall back to defaults instead of rejecting the request.

use serde::Deserialize;

/// `?name=` for the latest-version lookup.
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: Option<String>,
}

/// `?name=&limit=&offset=` for version listings.
#[derive(Debug, Deserialize)]
pub struct ListVersionsParams {
    pub name: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
