//! CrudService: the five table operations, typed per entity, over any `TableBackend`.

use crate::backend::{Filter, Row, TableBackend};
use crate::config::ID_COLUMN;
use crate::error::AppError;
use crate::models::Entity;
use serde::Serialize;
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// All rows, in whatever order the backend returns them.
    pub async fn list<E: Entity>(backend: &dyn TableBackend) -> Result<Vec<E>, AppError> {
        let rows = backend.select(E::table(), &[]).await?;
        decode_rows(rows)
    }

    /// Rows whose `column` equals `value`; possibly empty.
    pub async fn list_by<E: Entity>(
        backend: &dyn TableBackend,
        column: &'static str,
        value: i64,
    ) -> Result<Vec<E>, AppError> {
        let rows = backend.select(E::table(), &[Filter::eq(column, value)]).await?;
        decode_rows(rows)
    }

    /// Fetch one row by id. None when no row matches.
    pub async fn read<E: Entity>(backend: &dyn TableBackend, id: i64) -> Result<Option<E>, AppError> {
        let rows = backend.select(E::table(), &[Filter::eq(ID_COLUMN, id)]).await?;
        rows.into_iter().next().map(decode_row).transpose()
    }

    /// Insert one row; returns it as the backend echoes it, generated id included.
    pub async fn create<E: Entity>(backend: &dyn TableBackend, body: &E::Create) -> Result<E, AppError> {
        let row = to_row(body)?;
        let rows = backend.insert(E::table(), row).await?;
        let first = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Backend(format!("insert into {} returned no row", E::table().table_name)))?;
        decode_row(first)
    }

    /// Replace every writable column of row `id`. None when no row matches.
    pub async fn update<E: Entity>(
        backend: &dyn TableBackend,
        id: i64,
        body: &E::Create,
    ) -> Result<Option<E>, AppError> {
        let row = to_row(body)?;
        let rows = backend.update(E::table(), row, &[Filter::eq(ID_COLUMN, id)]).await?;
        rows.into_iter().next().map(decode_row).transpose()
    }

    /// Delete row `id`. Returns false when no row matched.
    pub async fn delete<E: Entity>(backend: &dyn TableBackend, id: i64) -> Result<bool, AppError> {
        let rows = backend.delete(E::table(), &[Filter::eq(ID_COLUMN, id)]).await?;
        Ok(!rows.is_empty())
    }
}

/// Encode a payload as a backend row. Every field is sent, absent optionals as null, so an
/// update is a full replacement.
pub(crate) fn to_row<T: Serialize>(body: &T) -> Result<Row, AppError> {
    match serde_json::to_value(body) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(AppError::BadRequest(format!("expected an object payload, got {}", other))),
        Err(e) => Err(AppError::BadRequest(e.to_string())),
    }
}

pub(crate) fn decode_row<E: Entity>(row: Row) -> Result<E, AppError> {
    let record: E = serde_json::from_value(Value::Object(row)).map_err(|source| AppError::Decode {
        table: E::table().table_name,
        source,
    })?;
    record.validate().map_err(|e| {
        AppError::Backend(format!("invalid {} row {}: {}", E::table().table_name, record.id(), e))
    })?;
    Ok(record)
}

pub(crate) fn decode_rows<E: Entity>(rows: Vec<Row>) -> Result<Vec<E>, AppError> {
    rows.into_iter().map(decode_row).collect()
}
