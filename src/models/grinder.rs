use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grinder {
    pub id: i64,
    pub name: String,
    pub user_manual_link: Option<String>,
    pub image: Option<String>,
    /// Link or path to the manufacturer's grind setting chart.
    pub setting_guide_chart: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrinderCreate {
    pub name: String,
    #[serde(default)]
    pub user_manual_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub setting_guide_chart: Option<String>,
}

impl Validate for Grinder {}
impl Validate for GrinderCreate {}

impl Entity for Grinder {
    type Create = GrinderCreate;

    fn table() -> &'static TableDef {
        &tables::GRINDER
    }

    fn id(&self) -> i64 {
        self.id
    }
}
