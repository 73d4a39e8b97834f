use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use crate::error::AppError;
use crate::service::validation::check_email;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Barista {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaristaCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Validate for Barista {
    fn validate(&self) -> Result<(), AppError> {
        check_email("email", &self.email)
    }
}

impl Validate for BaristaCreate {
    fn validate(&self) -> Result<(), AppError> {
        check_email("email", &self.email)
    }
}

impl Entity for Barista {
    type Create = BaristaCreate;

    fn table() -> &'static TableDef {
        &tables::BARISTA
    }

    fn id(&self) -> i64 {
        self.id
    }
}
