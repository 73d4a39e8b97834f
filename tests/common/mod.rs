//! Shared router setup for the HTTP tests: the full app over an in-memory backend.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use brew_journal::{app_service, App, AppState, BackendSettings, MemoryBackend, Settings, TableBackend};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_router() -> (App, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    (router_with(backend.clone()), backend)
}

/// The full app over any backend.
pub fn router_with(backend: Arc<dyn TableBackend>) -> App {
    let settings = Settings {
        backend: BackendSettings::Memory,
        port: 0,
        debug: false,
        cors_origins: vec!["http://localhost:5173".to_string()],
    };
    app_service(AppState::new(backend), &settings)
}

pub async fn request(
    router: &App,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let builder = Request::builder().method(method).uri(uri);

    let req = if let Some(payload) = body {
        let bytes =
            serde_json::to_vec(&payload).map_err(|err| format!("serialize request body: {err}"))?;
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .map_err(|err| format!("build request: {err}"))?
    } else {
        builder
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))?
    };

    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;

    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}

/// Every posted field comes back unchanged, next to a server-assigned integer id.
pub fn assert_echoes(posted: &Value, record: &Value) {
    let Some(fields) = posted.as_object() else {
        panic!("posted body is not an object: {posted}");
    };
    for (key, value) in fields {
        assert_eq!(record.get(key), Some(value), "field {key} in {record}");
    }
    assert!(record.get("id").and_then(Value::as_i64).is_some(), "no id in {record}");
}

pub fn id_of(record: &Value) -> Result<i64, String> {
    record
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| format!("no id in {record}"))
}
