//! Brew journal: REST facade over the coffee-brewing tables (roasters, beans, bags, equipment,
//! baristas, brews and grinder suggestions).

pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use backend::{connect, Filter, MemoryBackend, PgBackend, RestBackend, Row, TableBackend};
pub use config::{BackendSettings, Settings, TableDef};
pub use error::{AppError, ConfigError};
pub use response::error_body;
pub use routes::{app_router, app_service, common_routes, entity_routes, App};
pub use service::{brews_by_bean, CrudService};
pub use state::AppState;
