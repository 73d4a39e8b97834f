//! Direct SQL backend against the Postgres database behind the table service.

use super::{Filter, Row, TableBackend};
use crate::config::TableDef;
use crate::error::AppError;
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

pub struct PgBackend {
    pool: PgPool,
    schema: String,
}

impl PgBackend {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgBackend {
            pool,
            schema: schema.into(),
        }
    }

    async fn query_rows(&self, q: &QueryBuf) -> Result<Vec<Row>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

#[async_trait]
impl TableBackend for PgBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn select(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        self.query_rows(&sql::select(table, filters, &self.schema)).await
    }

    async fn insert(&self, table: &TableDef, row: Row) -> Result<Vec<Row>, AppError> {
        self.query_rows(&sql::insert(table, &row, &self.schema)).await
    }

    async fn update(&self, table: &TableDef, row: Row, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        self.query_rows(&sql::update(table, &row, filters, &self.schema)).await
    }

    async fn delete(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        self.query_rows(&sql::delete(table, filters, &self.schema)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Row {
    use sqlx::Column;
    use sqlx::Row as _;
    let mut map = Row::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row as _;
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(f64::from(n)) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
