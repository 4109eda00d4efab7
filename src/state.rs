//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::MappingService;

/// State cloned into each request.
///
/// The store is reached only through [`MappingService`], which holds it as
/// an `Arc<dyn MappingStore>`, so tests can swap in any backend.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>) -> Self {
        Self { mapping_service }
    }
}
