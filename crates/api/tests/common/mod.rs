#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use encore_api::config::{ServerConfig, StoreBackend};
use encore_api::router::build_app_router;
use encore_api::state::AppState;
use encore_core::service::ReservationService;
use encore_core::store::ConcertStore;
use encore_db::MemoryConcertStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3001` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        database_max_connections: 1,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned so tests can inspect its call counter.
pub fn build_test_app() -> (Router, Arc<MemoryConcertStore>) {
    let store = Arc::new(MemoryConcertStore::new());
    let shared: Arc<dyn ConcertStore> = store.clone();
    let state = AppState {
        concerts: ReservationService::new(shared),
    };
    (build_app_router(state, &test_config()), store)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a concert through the API and return its id.
pub async fn create_concert(app: Router, name: &str, seat_capacity: i32) -> String {
    let response = post_json(
        app,
        "/api/v1/concerts",
        serde_json::json!({"name": name, "description": "Test Description", "seat_capacity": seat_capacity}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

pub async fn reserve(app: Router, id: &str, user: &str) -> Response {
    post_json(
        app,
        &format!("/api/v1/concerts/{id}/reserve"),
        serde_json::json!({"user_name": user}),
    )
    .await
}

pub async fn cancel(app: Router, id: &str, user: &str) -> Response {
    patch_json(
        app,
        &format!("/api/v1/concerts/{id}/cancel"),
        serde_json::json!({"user_name": user}),
    )
    .await
}
