#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use versaver_api::config::{LogFormat, ServerConfig, StoreBackend, StoreConfig};
use versaver_api::router::build_app_router;
use versaver_api::state::AppState;
use versaver_db::store::{InMemoryVersionStore, VersionStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and a 30-second
/// request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: versaver_api::config::DEFAULT_MAX_BODY_BYTES,
        log_format: LogFormat::Pretty,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 5,
            op_timeout_secs: 10,
            max_save_attempts: 16,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given store.
pub fn build_test_app(store: Arc<dyn VersionStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied configuration.
pub fn build_test_app_with_config(store: Arc<dyn VersionStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store.
pub fn memory_app() -> Router {
    build_test_app(Arc::new(InMemoryVersionStore::new()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Save through the API and return the created record as JSON.
pub async fn save(app: &Router, name: &str, content: &str) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/save",
        serde_json::json!({ "name": name, "content": content }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
