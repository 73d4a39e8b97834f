use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roaster {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoasterCreate {
    pub name: String,
}

impl Validate for Roaster {}
impl Validate for RoasterCreate {}

impl Entity for Roaster {
    type Create = RoasterCreate;

    fn table() -> &'static TableDef {
        &tables::ROASTER
    }

    fn id(&self) -> i64 {
        self.id
    }
}
