//! PostgREST table API client (the REST surface a managed Supabase project exposes).

use super::{Filter, Row, TableBackend};
use crate::config::TableDef;
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response};
use serde_json::Value;

/// Table API root under the project URL.
const REST_PATH: &str = "/rest/v1";

pub struct RestBackend {
    base_url: String,
    key: String,
    client: reqwest::Client,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::Backend(format!("http client: {}", e)))?;
        Ok(RestBackend {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
            client,
        })
    }

    fn table_url(&self, table: &TableDef) -> String {
        format!("{}{}/{}", self.base_url, REST_PATH, table.table_name)
    }

    fn request(&self, method: Method, table: &TableDef, filters: &[Filter]) -> RequestBuilder {
        tracing::debug!(table = table.table_name, %method, filters = ?filters, "table request");
        self.client
            .request(method, self.table_url(table))
            .query(&filter_query(filters))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Writes ask the service to echo back the rows they touched.
    fn write_request(&self, method: Method, table: &TableDef, filters: &[Filter]) -> RequestBuilder {
        self.request(method, table, filters)
            .header("Prefer", "return=representation")
    }
}

/// Encode equality filters as PostgREST query pairs (`col=eq.value`).
pub(crate) fn filter_query(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| {
            let op = match &f.value {
                Value::Null => "is.null".to_string(),
                Value::String(s) => format!("eq.{}", s),
                other => format!("eq.{}", other),
            };
            (f.column.to_string(), op)
        })
        .collect()
}

async fn rows(response: Response) -> Result<Vec<Row>, AppError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(AppError::Backend(error_message(status, &body)));
    }
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Backend(format!("invalid table response: {}", e)))?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(AppError::Backend(format!("expected row object, got {}", other))),
            })
            .collect(),
        Value::Object(row) => Ok(vec![row]),
        other => Err(AppError::Backend(format!("expected row array, got {}", other))),
    }
}

/// Prefer the service's own `message`; fall back to the raw body.
fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body);
            if text.trim().is_empty() {
                format!("table service returned {}", status)
            } else {
                text.into_owned()
            }
        })
}

#[async_trait]
impl TableBackend for RestBackend {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn select(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let response = self
            .request(Method::GET, table, filters)
            .query(&[("select", "*")])
            .send()
            .await?;
        rows(response).await
    }

    async fn insert(&self, table: &TableDef, row: Row) -> Result<Vec<Row>, AppError> {
        let response = self
            .write_request(Method::POST, table, &[])
            .json(&row)
            .send()
            .await?;
        rows(response).await
    }

    async fn update(&self, table: &TableDef, row: Row, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let response = self
            .write_request(Method::PATCH, table, filters)
            .json(&row)
            .send()
            .await?;
        rows(response).await
    }

    async fn delete(&self, table: &TableDef, filters: &[Filter]) -> Result<Vec<Row>, AppError> {
        let response = self.write_request(Method::DELETE, table, filters).send().await?;
        rows(response).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        let response = self
            .client
            .get(format!("{}{}/", self.base_url, REST_PATH))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header(header::ACCEPT, "application/openapi+json")
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await?;
            Err(AppError::Backend(error_message(status, &body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tables::BEAN_GRINDER_SUGGESTION;
    use serde_json::json;

    #[test]
    fn filters_encode_as_eq_pairs() {
        let q = filter_query(&[
            Filter::eq("bean_id", 12),
            Filter::eq("suggestion_method", "manual"),
            Filter::eq("grinder_id", Value::Null),
        ]);
        assert_eq!(
            q,
            vec![
                ("bean_id".to_string(), "eq.12".to_string()),
                ("suggestion_method".to_string(), "eq.manual".to_string()),
                ("grinder_id".to_string(), "is.null".to_string()),
            ]
        );
    }

    #[test]
    fn table_url_uses_rest_root() {
        let backend = RestBackend::new("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(
            backend.table_url(&BEAN_GRINDER_SUGGESTION),
            "https://abc.supabase.co/rest/v1/bean_grinder_suggestion"
        );
    }

    #[test]
    fn error_message_prefers_service_message() {
        let body = serde_json::to_vec(&json!({
            "code": "23503",
            "message": "insert or update on table \"bag\" violates foreign key constraint",
            "details": null
        }))
        .unwrap();
        assert_eq!(
            error_message(reqwest::StatusCode::CONFLICT, &body),
            "insert or update on table \"bag\" violates foreign key constraint"
        );
        assert_eq!(error_message(reqwest::StatusCode::BAD_GATEWAY, b"upstream down"), "upstream down");
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_GATEWAY, b""),
            "table service returned 502 Bad Gateway"
        );
    }
}
