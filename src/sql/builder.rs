//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table descriptor.

use crate::backend::{Filter, Row};
use crate::config::{ColumnInfo, ColumnKind, TableDef, ID_COLUMN};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from table descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its cast placeholder, e.g. `$2::date`.
    /// Enum columns cast to the schema-qualified type: `$3::"public"."roast_level"`.
    fn push_param(&mut self, v: Value, c: &ColumnInfo, schema: &str) -> String {
        self.params.push(v);
        match c.kind {
            ColumnKind::Enum => format!("${}::{}", self.params.len(), qualified_table(schema, c.pg_type)),
            ColumnKind::Text | ColumnKind::Other => format!("${}::{}", self.params.len(), c.pg_type),
        }
    }
}

/// Column list for SELECT / RETURNING. Text and enum columns are read back through `::text`
/// so both decode as strings.
fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(c.name);
            if matches!(c.kind, ColumnKind::Text | ColumnKind::Enum) {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// WHERE clause for equality filters; filters on unknown columns are skipped.
fn where_clause(table: &TableDef, filters: &[Filter], schema: &str, q: &mut QueryBuf) -> String {
    let mut parts = Vec::new();
    for f in filters {
        let Some(c) = table.column(f.column) else { continue };
        if f.value.is_null() {
            parts.push(format!("{} IS NULL", quoted(c.name)));
        } else {
            let ph = q.push_param(f.value.clone(), c, schema);
            parts.push(format!("{} = {}", quoted(c.name), ph));
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// SELECT with optional equality filters, ordered by id.
pub fn select(table: &TableDef, filters: &[Filter], schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(table, filters, schema, &mut q);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(table),
        qualified_table(schema, table.table_name),
        where_sql,
        quoted(ID_COLUMN)
    );
    q
}

/// INSERT of the writable columns present in `row`. `id` is never written; columns the row
/// omits fall back to the database default.
pub fn insert(table: &TableDef, row: &Row, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in table.writable_columns() {
        let Some(v) = row.get(c.name) else { continue };
        placeholders.push(q.push_param(v.clone(), c, schema));
        cols.push(quoted(c.name));
    }
    let target = qualified_table(schema, table.table_name);
    let returning = select_column_list(table);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", target, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            target,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE matching rows: SET every writable column present in `row`.
/// With nothing to set this degrades to a SELECT of the matching rows.
pub fn update(table: &TableDef, row: &Row, filters: &[Filter], schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.writable_columns() {
        let Some(v) = row.get(c.name) else { continue };
        let ph = q.push_param(v.clone(), c, schema);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    if sets.is_empty() {
        return select(table, filters, schema);
    }
    let where_sql = where_clause(table, filters, schema, &mut q);
    q.sql = format!(
        "UPDATE {} SET {}{} RETURNING {}",
        qualified_table(schema, table.table_name),
        sets.join(", "),
        where_sql,
        select_column_list(table)
    );
    q
}

/// DELETE matching rows, returning what was removed.
pub fn delete(table: &TableDef, filters: &[Filter], schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(table, filters, schema, &mut q);
    q.sql = format!(
        "DELETE FROM {}{} RETURNING {}",
        qualified_table(schema, table.table_name),
        where_sql,
        select_column_list(table)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tables::{BAG, BEAN, ROASTER};
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn select_with_filter_casts_param() {
        let q = select(&BAG, &[Filter::eq("bean_id", 4)], "public");
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"name\"::text AS \"name\", \"bean_id\", \"roast_date\", \"weight\", \"price\", \
             \"purchase_location\"::text AS \"purchase_location\", \"rating\" \
             FROM \"public\".\"bag\" WHERE \"bean_id\" = $1::bigint ORDER BY \"id\""
        );
        assert_eq!(q.params, vec![json!(4)]);
    }

    #[test]
    fn insert_skips_id_and_absent_columns() {
        let q = insert(
            &BAG,
            &row(json!({"id": 99, "name": "Holiday", "bean_id": 2, "roast_date": "2024-11-02"})),
            "public",
        );
        assert!(q.sql.starts_with(
            "INSERT INTO \"public\".\"bag\" (\"name\", \"bean_id\", \"roast_date\") VALUES ($1::text, $2::bigint, $3::date) RETURNING "
        ));
        assert_eq!(q.params, vec![json!("Holiday"), json!(2), json!("2024-11-02")]);
    }

    #[test]
    fn update_binds_sets_before_filters() {
        let q = update(&ROASTER, &row(json!({"name": "Onyx"})), &[Filter::eq("id", 3)], "coffee");
        assert_eq!(
            q.sql,
            "UPDATE \"coffee\".\"roaster\" SET \"name\" = $1::text WHERE \"id\" = $2::bigint \
             RETURNING \"id\", \"name\"::text AS \"name\""
        );
        assert_eq!(q.params, vec![json!("Onyx"), json!(3)]);
    }

    #[test]
    fn update_with_nothing_to_set_selects() {
        let q = update(&ROASTER, &Row::new(), &[Filter::eq("id", 3)], "public");
        assert!(q.sql.starts_with("SELECT "));
        assert_eq!(q.params, vec![json!(3)]);
    }

    #[test]
    fn delete_returns_removed_rows() {
        let q = delete(&ROASTER, &[Filter::eq("id", 8)], "public");
        assert_eq!(
            q.sql,
            "DELETE FROM \"public\".\"roaster\" WHERE \"id\" = $1::bigint RETURNING \"id\", \"name\"::text AS \"name\""
        );
    }

    #[test]
    fn enum_column_casts_to_schema_type() {
        let q = insert(
            &BEAN,
            &row(json!({"name": "Kochere", "roaster_id": 1, "roast_level": "Light"})),
            "coffee",
        );
        assert!(q.sql.starts_with(
            "INSERT INTO \"coffee\".\"bean\" (\"name\", \"roaster_id\", \"roast_level\") \
             VALUES ($1::text, $2::bigint, $3::\"coffee\".\"roast_level\") RETURNING "
        ));
        assert!(q.sql.contains("\"roast_level\"::text AS \"roast_level\""));

        let q = update(&BEAN, &row(json!({"roast_level": "Dark"})), &[Filter::eq("id", 2)], "public");
        assert_eq!(
            q.sql.split(" RETURNING ").next(),
            Some("UPDATE \"public\".\"bean\" SET \"roast_level\" = $1::\"public\".\"roast_level\" WHERE \"id\" = $2::bigint")
        );
    }
}
