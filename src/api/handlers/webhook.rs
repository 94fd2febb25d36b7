//! The webhook receiver: one inbound request, one storage write, one
//! acknowledgement.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::Method;

use crate::api::dto::WebhookAck;
use crate::app_state::AppState;
use crate::domain::WebhookRecord;
use crate::error::GatewayError;

/// Fixed acknowledgement text for persisted webhooks.
pub const ACK_MESSAGE: &str = "Webhook processado";

/// Upper bound on buffered request bodies.
const MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Receives a webhook on any path, persists it, and acknowledges it.
///
/// Non-`POST` requests are rejected with `405` before the body is read.
/// Everything that fails afterwards (unparseable body, missing storage
/// credentials, storage failure) collapses to the uniform `500` JSON
/// shape; the sender is expected to retry the whole request if it treats
/// the failure as transient.
///
/// # Errors
///
/// Returns [`GatewayError`]; see [`crate::error`] for the response
/// mapping.
pub async fn receive_webhook(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<WebhookAck>, GatewayError> {
    if request.method() != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    let body = axum::body::to_bytes(request.into_body(), MAX_PAYLOAD_BYTES)
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))?;

    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "unparseable webhook body");
        GatewayError::PayloadParse(e.to_string())
    })?;
    tracing::info!(payload = %payload, "webhook received");

    let store = state.store.as_ref().ok_or_else(|| {
        tracing::error!("storage credentials not configured");
        GatewayError::MissingCredentials
    })?;

    let record = WebhookRecord::from_payload(payload);
    let stored = store.insert_returning(record).await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to persist webhook");
    })?;

    tracing::info!(
        entry_id = %stored.id,
        event = %stored.record.event,
        email = %stored.record.email,
        "webhook stored"
    );

    Ok(Json(WebhookAck {
        success: true,
        message: ACK_MESSAGE.to_string(),
        entry_id: stored.id,
    }))
}
