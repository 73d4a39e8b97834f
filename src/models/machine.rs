use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use crate::error::AppError;
use crate::service::validation::check_http_url;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub manufacturer: Option<String>,
    pub user_manual_link: Option<String>,
    /// URL or storage path.
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineCreate {
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub user_manual_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Validate for Machine {
    fn validate(&self) -> Result<(), AppError> {
        check_http_url("user_manual_link", self.user_manual_link.as_deref())
    }
}

impl Validate for MachineCreate {
    fn validate(&self) -> Result<(), AppError> {
        check_http_url("user_manual_link", self.user_manual_link.as_deref())
    }
}

impl Entity for Machine {
    type Create = MachineCreate;

    fn table() -> &'static TableDef {
        &tables::MACHINE
    }

    fn id(&self) -> i64 {
        self.id
    }
}
