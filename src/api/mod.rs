//! HTTP layer: acknowledgement DTOs, the webhook handler, and router
//! composition.
//!
//! The endpoint is method-gated, not path-gated: the router installs the
//! handler as a fallback so a `POST` to any path is handled identically.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the gateway router: one catch-all webhook handler.
pub fn build_router() -> Router<AppState> {
    Router::new().fallback(handlers::webhook::receive_webhook)
}
