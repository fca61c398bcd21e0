//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no chat state of its own; it only holds the upstream backend.

use std::sync::Arc;

use crate::upstream::QueryBackend;

/// Clone is required by Axum; the backend is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn QueryBackend>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self { backend }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
