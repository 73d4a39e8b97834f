//! Record and create-payload types for every table.
//!
//! A record is what the backend stores (server-assigned `id` plus columns); a create payload
//! is the same columns without `id`, sent on POST and, as a full replacement, on PUT.

pub mod bag;
pub mod barista;
pub mod bean;
pub mod brew;
pub mod grinder;
pub mod machine;
pub mod roaster;
pub mod suggestion;
pub mod timestamp;

pub use bag::{Bag, BagCreate};
pub use barista::{Barista, BaristaCreate};
pub use bean::{Bean, BeanCreate, RoastLevel};
pub use brew::{Brew, BrewCreate};
pub use grinder::{Grinder, GrinderCreate};
pub use machine::{Machine, MachineCreate};
pub use roaster::{Roaster, RoasterCreate};
pub use suggestion::{
    BagGrinderSuggestion, BagGrinderSuggestionCreate, BeanGrinderSuggestion, BeanGrinderSuggestionCreate,
};

use crate::config::TableDef;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Field constraints beyond what the type itself enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A stored record type bound to its table.
pub trait Entity: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    /// Body accepted by create and full-replace update.
    type Create: Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    fn table() -> &'static TableDef;

    fn id(&self) -> i64;
}
