pub mod health;
pub mod versions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /save                          save a new version (POST)
/// /version/{id}                  get one version
/// /latest?name=                  newest version of a name
/// /versions?name=&limit=&offset= paginated listing
/// /names                         distinct names
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(versions::router())
}
