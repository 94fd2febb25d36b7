//! Shared application state injected into the Axum handler.

use std::sync::Arc;

use crate::persistence::WebhookStore;

/// Shared application state available to handlers via Axum's `State`
/// extractor.
///
/// The store is `None` when the process was started without storage
/// credentials; every request is then rejected with a configuration error
/// until the environment is corrected, without touching the network.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage backend, absent when credentials are not configured.
    pub store: Option<Arc<dyn WebhookStore>>,
}
