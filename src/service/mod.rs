//! CrudService: typed CRUD over the table backend, plus the bean -> bag -> brew join.

pub mod brews;
mod crud;
pub mod validation;
pub use brews::brews_by_bean;
pub use crud::CrudService;
