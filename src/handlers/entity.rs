//! Entity CRUD handlers: list, read, create, update, delete, list-by-column, brews-by-bean.
//!
//! Handlers are generic over the record type; the router instantiates one set per table.

use crate::error::AppError;
use crate::models::{Entity, Validate};
use crate::response;
use crate::service::{self, CrudService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Decode and check a create/update body. Runs before any backend call.
fn parse_body<T: DeserializeOwned + Validate>(body: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if !value.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    let payload: T = serde_json::from_value(value).map_err(|e| AppError::Validation(e.to_string()))?;
    payload.validate()?;
    Ok(payload)
}

pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<E>(state.backend.as_ref()).await?;
    Ok(response::many(rows))
}

pub async fn read<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let record = CrudService::read::<E>(state.backend.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound(E::table().label))?;
    Ok(response::ok(record))
}

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload: E::Create = parse_body(body)?;
    let record = CrudService::create::<E>(state.backend.as_ref(), &payload).await?;
    Ok(response::created(record))
}

/// Full replacement: every writable column is overwritten, absent optionals become null.
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let payload: E::Create = parse_body(body)?;
    let record = CrudService::update::<E>(state.backend.as_ref(), id, &payload)
        .await?
        .ok_or(AppError::NotFound(E::table().label))?;
    Ok(response::ok(record))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    if !CrudService::delete::<E>(state.backend.as_ref(), id).await? {
        return Err(AppError::NotFound(E::table().label));
    }
    Ok(response::no_content())
}

/// GET handler listing rows whose `column` equals the path id.
pub fn list_by<E: Entity>(column: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, Path(id): Path<String>| async move {
        let id = parse_id(&id)?;
        let rows = CrudService::list_by::<E>(state.backend.as_ref(), column, id).await?;
        Ok::<_, AppError>(response::many(rows))
    })
}

pub async fn brews_by_bean(
    State(state): State<AppState>,
    Path(bean_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bean_id = parse_id(&bean_id)?;
    let brews = service::brews_by_bean(state.backend.as_ref(), bean_id).await?;
    Ok(response::many(brews))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeanCreate;
    use serde_json::json;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn body_checks_run_in_order() {
        let not_object = parse_body::<BeanCreate>(Ok(Json(json!([1, 2]))));
        assert!(matches!(not_object, Err(AppError::BadRequest(_))));

        let missing_name = parse_body::<BeanCreate>(Ok(Json(json!({"roaster_id": 1, "roast_level": "Dark"}))));
        assert!(matches!(missing_name, Err(AppError::Validation(_))));

        let out_of_range = parse_body::<BeanCreate>(Ok(Json(
            json!({"name": "Kochere", "roaster_id": 1, "roast_level": "Light", "rating": 6}),
        )));
        assert!(matches!(out_of_range, Err(AppError::Validation(_))));

        let ok = parse_body::<BeanCreate>(Ok(Json(
            json!({"id": 99, "name": "Kochere", "roaster_id": 1, "roast_level": "Light", "extra": true}),
        )))
        .unwrap();
        assert_eq!(ok.name, "Kochere");
    }
}
