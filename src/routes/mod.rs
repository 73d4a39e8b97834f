//! Router assembly: entity routes, common routes, CORS, body limit and trailing-slash
//! normalization.

pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::{crud_routes, entity_routes};

use crate::config::Settings;
use crate::response::error_body;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::NormalizePath;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Allow-list CORS; origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "skipping invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", "route not found".into())),
    )
}

/// The full application: every table's routes plus health/ready/version.
pub fn app_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(entity_routes())
        .merge(common_routes())
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(&settings.cors_origins))
        .with_state(state)
}

/// Served application. Trailing slashes are trimmed before routing, so `/beans/` and
/// `/beans` reach the same handler.
pub type App = NormalizePath<Router>;

pub fn app_service(state: AppState, settings: &Settings) -> App {
    NormalizePath::trim_trailing_slash(app_router(state, settings))
}
