use super::{timestamp, Entity, Validate};
use crate::config::{tables, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One brewing event. `yield` is a Rust keyword, so the field is `yield_` here and `yield` on
/// the wire and in the table; serde's rename is the only place the two names meet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brew {
    pub id: i64,
    pub name: String,
    pub machine_id: i64,
    pub bag_id: i64,
    pub grinder_id: i64,
    pub barista_id: i64,
    pub brew_time: Option<f64>,
    #[serde(default, with = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub dose: Option<f64>,
    #[serde(rename = "yield")]
    pub yield_: Option<f64>,
    pub rating: Option<i64>,
    pub tasting_notes: Option<String>,
    pub reflections: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrewCreate {
    pub name: String,
    pub machine_id: i64,
    pub bag_id: i64,
    pub grinder_id: i64,
    pub barista_id: i64,
    #[serde(default)]
    pub brew_time: Option<f64>,
    #[serde(default, with = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dose: Option<f64>,
    #[serde(default, rename = "yield")]
    pub yield_: Option<f64>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub tasting_notes: Option<String>,
    #[serde(default)]
    pub reflections: Option<String>,
}

impl Validate for Brew {}
impl Validate for BrewCreate {}

impl Entity for Brew {
    type Create = BrewCreate;

    fn table() -> &'static TableDef {
        &tables::BREW
    }

    fn id(&self) -> i64 {
        self.id
    }
}
