//! Route definitions for version snapshots.
//!
//! Mounted at the `/api/v1` root.
//!
//! ```text
//! POST /save           save_text
//! GET  /version/{id}   get_version
//! GET  /latest         get_latest
//! GET  /versions       list_versions
//! GET  /names          list_names
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::versions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(versions::save_text))
        .route("/version/{id}", get(versions::get_version))
        .route("/latest", get(versions::get_latest))
        .route("/versions", get(versions::list_versions))
        .route("/names", get(versions::list_names))
}
