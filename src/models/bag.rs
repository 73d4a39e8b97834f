use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    pub id: i64,
    pub name: String,
    pub bean_id: i64,
    pub roast_date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub price: Option<f64>,
    pub purchase_location: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BagCreate {
    pub name: String,
    pub bean_id: i64,
    #[serde(default)]
    pub roast_date: Option<NaiveDate>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub purchase_location: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl Validate for Bag {}
impl Validate for BagCreate {}

impl Entity for Bag {
    type Create = BagCreate;

    fn table() -> &'static TableDef {
        &tables::BAG
    }

    fn id(&self) -> i64 {
        self.id
    }
}
