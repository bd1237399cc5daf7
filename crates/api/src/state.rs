use std::sync::Arc;

use versaver_db::store::VersionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Snapshot storage backend (PostgreSQL or in-memory).
    pub store: Arc<dyn VersionStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
