//! # Application State
//!
//! Shared state passed to all route handlers via the `State` extractor.
//! The store is constructed once at startup and injected here; nothing in
//! the crate reaches for a global connection.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::store::{ItemStore, MemoryItemStore};

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    /// Present only when a Prometheus recorder was installed at startup.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// State over the given store, without a metrics endpoint.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// State over a fresh [`MemoryItemStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryItemStore::new()))
    }

    /// Expose `/metrics` from this recorder handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
