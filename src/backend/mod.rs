//! Table service seam. Handlers only ever see `dyn TableBackend`; which service sits behind it
//! is decided once at startup from [`BackendSettings`].

mod memory;
mod postgres;
mod rest;

pub use memory::{BackendCall, MemoryBackend, Operation};
pub use postgres::PgBackend;
pub use rest::RestBackend;

use crate::config::{BackendSettings, TableDef};
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One table row keyed by column name.
pub type Row = Map<String, Value>;

/// Column equality predicate. Several filters are AND-ed.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter {
            column,
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match row.get(self.column) {
            Some(v) => value_eq(v, &self.value),
            None => self.value.is_null(),
        }
    }
}

/// Loose equality: numbers compare by value so `5` matches `5.0`.
pub(crate) fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

/// Table operations the handlers need. Writes echo back the rows they touched; an empty
/// echo from `update` or `delete` means no row matched.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Short name for logs and readiness output.
    fn name(&self) -> &'static str;

    async fn select(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError>;

    async fn insert(&self, table: &TableDef, row: Row) -> Result<Vec<Row>, AppError>;

    async fn update(&self, table: &TableDef, row: Row, filters: &[Filter]) -> Result<Vec<Row>, AppError>;

    async fn delete(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Build the process-wide backend handle.
pub async fn connect(settings: &BackendSettings) -> Result<Arc<dyn TableBackend>, ConfigError> {
    let backend: Arc<dyn TableBackend> = match settings {
        BackendSettings::Rest { url, key } => Arc::new(RestBackend::new(url.clone(), key.clone())?),
        BackendSettings::Postgres { database_url, schema } => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .map_err(|e| ConfigError::Backend(e.to_string()))?;
            Arc::new(PgBackend::new(pool, schema.clone()))
        }
        BackendSettings::Memory => Arc::new(MemoryBackend::new()),
    };
    tracing::info!(backend = backend.name(), "table backend ready");
    Ok(backend)
}
