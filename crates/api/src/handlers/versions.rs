//! Handlers for the version snapshot endpoints.
//!
//! Each handler validates the request shape, calls exactly one store
//! operation and serializes the outcome.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use versaver_core::types::DbId;
use versaver_core::versioning::{
    parse_limit_param, parse_offset_param, validate_content, validate_name,
};
use versaver_db::models::version::VersionRecord;

use crate::error::{AppError, AppResult};
use crate::query::{ListVersionsParams, NameParams};
use crate::response::{NamesResponse, VersionListResponse};
use crate::state::AppState;

/// Request body for `POST /save`. Missing fields deserialize as empty and
/// are rejected by validation.
#[derive(Debug, Deserialize)]
pub struct SaveTextRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub name: String,
}

/// POST /api/v1/save
///
/// Stores the body as the next version of its name. Returns 201 with the
/// created record.
pub async fn save_text(
    State(state): State<AppState>,
    payload: Result<Json<SaveTextRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<VersionRecord>)> {
    let Json(input) =
        payload.map_err(|e| AppError::BadRequest(format!("Invalid request: {}", e.body_text())))?;

    validate_content(&input.content)?;
    validate_name(&input.name)?;

    let version = state.store.save_text(&input.content, &input.name).await?;
    tracing::info!(
        id = version.id,
        name = %version.name,
        version_num = version.version_num,
        "Saved version",
    );
    Ok((StatusCode::CREATED, Json(version)))
}

/// GET /api/v1/version/{id}
pub async fn get_version(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<VersionRecord>> {
    let id = parse_version_id(&raw_id)?;
    let version = state.store.get_version(id).await?;
    Ok(Json(version))
}

/// GET /api/v1/latest?name=
pub async fn get_latest(
    State(state): State<AppState>,
    params: Result<Query<NameParams>, QueryRejection>,
) -> AppResult<Json<VersionRecord>> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required_name(params.name)?;
    let version = state.store.get_latest(&name).await?;
    Ok(Json(version))
}

/// GET /api/v1/versions?name=&limit=&offset=
///
/// Newest first. Unparseable or negative `limit`/`offset` fall back to the
/// defaults; the applied values are echoed in the response.
pub async fn list_versions(
    State(state): State<AppState>,
    params: Result<Query<ListVersionsParams>, QueryRejection>,
) -> AppResult<Json<VersionListResponse>> {
    let Query(params) = params.map_err(invalid_query)?;
    let name = required_name(params.name)?;
    let limit = parse_limit_param(params.limit.as_deref());
    let offset = parse_offset_param(params.offset.as_deref());

    let page = state.store.list_versions(&name, limit, offset).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/names
pub async fn list_names(State(state): State<AppState>) -> AppResult<Json<NamesResponse>> {
    let names = state.store.list_names().await?;
    Ok(Json(NamesResponse { names }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Version ids are non-negative integers that fit in a `BIGINT`.
fn parse_version_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| DbId::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid version ID".into()))
}

/// Keeps malformed query strings on the JSON error contract.
fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
}

fn required_name(name: Option<String>) -> AppResult<String> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(AppError::BadRequest("name is required".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_id_accepts_plain_integers() {
        assert_eq!(parse_version_id("42").unwrap(), 42);
        assert_eq!(parse_version_id("0").unwrap(), 0);
    }

    #[test]
    fn version_id_rejects_garbage() {
        for raw in ["abc", "-1", "1.5", "", "99999999999999999999"] {
            assert!(
                matches!(parse_version_id(raw), Err(AppError::BadRequest(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn blank_name_is_missing() {
        assert!(required_name(None).is_err());
        assert!(required_name(Some(String::new())).is_err());
        assert_eq!(required_name(Some("doc".into())).unwrap(), "doc");
    }
}
