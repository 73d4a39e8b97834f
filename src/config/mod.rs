pub mod settings;
pub mod tables;

pub use settings::*;
pub use tables::{ColumnInfo, ColumnKind, TableDef, ALL_TABLES, ID_COLUMN};
