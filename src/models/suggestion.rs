//! Grinder setting suggestions for a bean or for a specific bag.

use super::{timestamp, Entity, Validate};
use crate::config::{tables, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeanGrinderSuggestion {
    pub id: i64,
    pub grinder_id: i64,
    pub bean_id: i64,
    /// Numeric grinder setting.
    pub suggestion: Option<f64>,
    /// Human-readable form of the setting, e.g. "2 turns + 4 clicks".
    pub friendly_suggestion: Option<String>,
    pub suggestion_method: Option<String>,
    #[serde(default, with = "timestamp")]
    pub generation_timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeanGrinderSuggestionCreate {
    pub grinder_id: i64,
    pub bean_id: i64,
    #[serde(default)]
    pub suggestion: Option<f64>,
    #[serde(default)]
    pub friendly_suggestion: Option<String>,
    #[serde(default)]
    pub suggestion_method: Option<String>,
    #[serde(default, with = "timestamp")]
    pub generation_timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BagGrinderSuggestion {
    pub id: i64,
    pub grinder_id: i64,
    pub bag_id: i64,
    pub suggestion: Option<f64>,
    pub friendly_suggestion: Option<String>,
    pub suggestion_method: Option<String>,
    #[serde(default, with = "timestamp")]
    pub generation_timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BagGrinderSuggestionCreate {
    pub grinder_id: i64,
    pub bag_id: i64,
    #[serde(default)]
    pub suggestion: Option<f64>,
    #[serde(default)]
    pub friendly_suggestion: Option<String>,
    #[serde(default)]
    pub suggestion_method: Option<String>,
    #[serde(default, with = "timestamp")]
    pub generation_timestamp: Option<DateTime<Utc>>,
}

impl Validate for BeanGrinderSuggestion {}
impl Validate for BeanGrinderSuggestionCreate {}
impl Validate for BagGrinderSuggestion {}
impl Validate for BagGrinderSuggestionCreate {}

impl Entity for BeanGrinderSuggestion {
    type Create = BeanGrinderSuggestionCreate;

    fn table() -> &'static TableDef {
        &tables::BEAN_GRINDER_SUGGESTION
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for BagGrinderSuggestion {
    type Create = BagGrinderSuggestionCreate;

    fn table() -> &'static TableDef {
        &tables::BAG_GRINDER_SUGGESTION
    }

    fn id(&self) -> i64 {
        self.id
    }
}
