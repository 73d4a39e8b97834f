//! Health, readiness, version, unknown routes and CORS.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{request, test_router};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_and_version() -> Result<(), String> {
    let (router, backend) = test_router();

    let (status, body) = request(&router, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = request(&router, Method::GET, "/version", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "brew-journal");
    assert!(body["version"].is_string());

    assert!(backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn ready_reflects_backend() -> Result<(), String> {
    let (router, backend) = test_router();

    let (status, body) = request(&router, Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "backend": "ok"}));

    backend.fail_with(Some("connection reset"));
    let (status, body) = request(&router, Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "degraded", "backend": "unavailable"}));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404_envelope() -> Result<(), String> {
    let (router, _) = test_router();

    let (status, body) = request(&router, Method::GET, "/espresso", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    Ok(())
}

#[tokio::test]
async fn cors_allows_listed_origin_only() -> Result<(), String> {
    let (router, _) = test_router();

    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/beans")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))
    };

    let response = router
        .clone()
        .oneshot(preflight("http://localhost:5173")?)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
        Some(&b"http://localhost:5173"[..])
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).map(|v| v.as_bytes()),
        Some(&b"true"[..])
    );

    let response = router
        .clone()
        .oneshot(preflight("https://evil.example")?)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}
