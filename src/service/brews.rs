//! Brews for a bean: bean -> bags -> brews, joined on this side of the wire.
//!
//! Not atomic. The bag lookup and the per-bag brew lookups are separate backend reads, so a
//! bag added or removed in between can be missed or half-seen.

use crate::backend::{Filter, TableBackend};
use crate::config::{tables, ID_COLUMN};
use crate::error::AppError;
use crate::models::Brew;
use crate::service::crud::decode_rows;
use serde_json::Value;

/// Brews of every bag of `bean_id`, in bag-query order, then brew-query order within a bag.
/// One backend round-trip per bag; no brew query at all when the bean has no bags.
pub async fn brews_by_bean(backend: &dyn TableBackend, bean_id: i64) -> Result<Vec<Brew>, AppError> {
    let bags = backend
        .select(&tables::BAG, &[Filter::eq("bean_id", bean_id)])
        .await?;
    if bags.is_empty() {
        return Ok(Vec::new());
    }

    let bag_ids = bags
        .iter()
        .map(|bag| {
            bag.get(ID_COLUMN)
                .and_then(Value::as_i64)
                .ok_or_else(|| AppError::Backend("bag row without an integer id".into()))
        })
        .collect::<Result<Vec<i64>, AppError>>()?;

    let mut brews = Vec::new();
    for bag_id in bag_ids {
        let rows = backend
            .select(&tables::BREW, &[Filter::eq("bag_id", bag_id)])
            .await?;
        brews.extend(decode_rows::<Brew>(rows)?);
    }
    tracing::debug!(bean_id, brews = brews.len(), "brews by bean");
    Ok(brews)
}
