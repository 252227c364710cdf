//! Shared application state for all routes.

use crate::backend::SqlBackend;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Built once at startup and never swapped.
    pub backend: Arc<dyn SqlBackend>,
}

impl AppState {
    pub fn new<B: SqlBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}
