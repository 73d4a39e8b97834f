//! Shared application state for all routes.

use crate::backend::TableBackend;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; tests swap in a `MemoryBackend`.
    pub backend: Arc<dyn TableBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        AppState { backend }
    }
}
