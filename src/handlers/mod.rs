//! HTTP handlers for table CRUD and the filtered list variants.

pub mod entity;
pub use entity::*;
