//! In-process tables for local runs and tests. Records every call so tests can see which
//! queries a request issued.

use super::{Filter, Row, TableBackend};
use crate::config::{TableDef, ALL_TABLES, ID_COLUMN};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendCall {
    pub operation: Operation,
    pub table: &'static str,
    pub filters: Vec<Filter>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: i64,
    rows: Vec<Row>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<&'static str, MemoryTable>,
    calls: Vec<BackendCall>,
    failure: Option<String>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every following call fail with `message` (None restores normal behavior).
    pub fn fail_with(&self, message: Option<&str>) {
        self.lock().failure = message.map(str::to_string);
    }

    /// Number of rows currently stored in `table`.
    pub fn row_count(&self, table: &TableDef) -> usize {
        self.lock()
            .tables
            .get(table.table_name)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call, then hand back the table it targets.
    fn begin<'a>(
        inner: &'a mut Inner,
        operation: Operation,
        table: &TableDef,
        filters: &[Filter],
    ) -> Result<&'a mut MemoryTable, AppError> {
        let Some(known) = ALL_TABLES.iter().find(|t| t.table_name == table.table_name) else {
            return Err(AppError::Backend(format!(
                "relation \"{}\" does not exist",
                table.table_name
            )));
        };
        inner.calls.push(BackendCall {
            operation,
            table: known.table_name,
            filters: filters.to_vec(),
        });
        if let Some(message) = &inner.failure {
            return Err(AppError::Backend(message.clone()));
        }
        Ok(inner.tables.entry(known.table_name).or_default())
    }
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Keep only the table's writable columns; `id` is owned by the store.
fn writable(table: &TableDef, row: Row) -> Row {
    row.into_iter()
        .filter(|(k, _)| table.writable_columns().any(|c| c.name == k.as_str()))
        .collect()
}

#[async_trait]
impl TableBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn select(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let mut inner = self.lock();
        let t = Self::begin(&mut inner, Operation::Select, table, filters)?;
        Ok(t.rows.iter().filter(|r| matches_all(r, filters)).cloned().collect())
    }

    async fn insert(&self, table: &TableDef, row: Row) -> Result<Vec<Row>, AppError> {
        let mut inner = self.lock();
        let t = Self::begin(&mut inner, Operation::Insert, table, &[])?;
        t.last_id += 1;
        let mut stored = Row::new();
        stored.insert(ID_COLUMN.to_string(), Value::from(t.last_id));
        for c in table.writable_columns() {
            stored.insert(c.name.to_string(), Value::Null);
        }
        stored.extend(writable(table, row));
        t.rows.push(stored.clone());
        Ok(vec![stored])
    }

    async fn update(&self, table: &TableDef, row: Row, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let mut inner = self.lock();
        let t = Self::begin(&mut inner, Operation::Update, table, filters)?;
        let changes = writable(table, row);
        let mut out = Vec::new();
        for stored in t.rows.iter_mut().filter(|r| matches_all(r, filters)) {
            stored.extend(changes.clone());
            out.push(stored.clone());
        }
        Ok(out)
    }

    async fn delete(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let mut inner = self.lock();
        let t = Self::begin(&mut inner, Operation::Delete, table, filters)?;
        let (removed, kept): (Vec<Row>, Vec<Row>) =
            std::mem::take(&mut t.rows).into_iter().partition(|r| matches_all(r, filters));
        t.rows = kept;
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        match &self.lock().failure {
            Some(message) => Err(AppError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tables::{BAG, ROASTER};
    use crate::config::tables::typed;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_ignores_client_id() {
        let backend = MemoryBackend::new();
        let first = backend.insert(&ROASTER, row(json!({"id": 42, "name": "Onyx"}))).await.unwrap();
        let second = backend.insert(&ROASTER, row(json!({"name": "Sey"}))).await.unwrap();
        assert_eq!(first[0].get("id"), Some(&json!(1)));
        assert_eq!(second[0].get("id"), Some(&json!(2)));
        assert_eq!(backend.row_count(&ROASTER), 2);
    }

    #[tokio::test]
    async fn insert_fills_missing_columns_with_null() {
        let backend = MemoryBackend::new();
        let rows = backend.insert(&BAG, row(json!({"name": "Gesha", "bean_id": 1}))).await.unwrap();
        assert_eq!(rows[0].get("roast_date"), Some(&Value::Null));
        assert_eq!(rows[0].len(), BAG.columns.len());
    }

    #[tokio::test]
    async fn update_and_delete_echo_touched_rows() {
        let backend = MemoryBackend::new();
        backend.insert(&ROASTER, row(json!({"name": "Onyx"}))).await.unwrap();
        let none = backend
            .update(&ROASTER, row(json!({"name": "x"})), &[Filter::eq("id", 9)])
            .await
            .unwrap();
        assert!(none.is_empty());
        let updated = backend
            .update(&ROASTER, row(json!({"name": "Onyx Coffee Lab"})), &[Filter::eq("id", 1)])
            .await
            .unwrap();
        assert_eq!(updated[0].get("name"), Some(&json!("Onyx Coffee Lab")));
        let removed = backend.delete(&ROASTER, &[Filter::eq("id", 1)]).await.unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(backend.row_count(&ROASTER), 0);
    }

    #[tokio::test]
    async fn records_calls_and_injected_failures() {
        let backend = MemoryBackend::new();
        backend.fail_with(Some("connection refused"));
        let err = backend.select(&ROASTER, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(backend.ping().await.is_err());
        assert_eq!(
            backend.calls(),
            vec![BackendCall {
                operation: Operation::Select,
                table: "roaster",
                filters: vec![]
            }]
        );
    }

    #[tokio::test]
    async fn unknown_table_is_a_backend_error() {
        static NOWHERE: TableDef = TableDef {
            table_name: "nowhere",
            path_segment: "nowhere",
            label: "Nowhere",
            columns: &[typed("id", "bigint")],
        };
        let backend = MemoryBackend::new();
        let err = backend.select(&NOWHERE, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "relation \"nowhere\" does not exist");
        assert!(backend.calls().is_empty());
    }
}
