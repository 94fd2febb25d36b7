//! Gateway error types with HTTP response mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. The external
//! contract collapses every post-method-check failure to the same `500`
//! JSON shape; the enum keeps the internal classification so a future
//! version can map kinds to distinct status codes without changing callers.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Plain-text body returned for non-`POST` requests.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Método não permitido";

/// Uniform JSON body for every failed request.
///
/// All failure responses follow this shape:
/// ```json
/// { "success": false, "message": "database error: ..." }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorAck {
    /// Always `false` for failures.
    pub success: bool,
    /// Human-readable failure description.
    pub message: String,
}

/// Server-side error enum covering every way a request can fail.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request used a method other than `POST`.
    #[error("{METHOD_NOT_ALLOWED_BODY}")]
    MethodNotAllowed,

    /// Request body was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    PayloadParse(String),

    /// Storage endpoint URL or service key is not configured.
    #[error("storage credentials not configured")]
    MissingCredentials,

    /// The storage backend rejected or failed the insert.
    #[error("database error: {0}")]
    Storage(String),

    /// Anything else thrown during processing.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    ///
    /// Every failure after the method check maps to `500`; callers cannot
    /// distinguish a transient storage outage from a malformed payload
    /// except by the message text.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadParse(_)
            | Self::MissingCredentials
            | Self::Storage(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            // Plain-text 405 with no Content-Type header.
            Self::MethodNotAllowed => {
                let mut response = Body::from(METHOD_NOT_ALLOWED_BODY).into_response();
                *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
                response
            }
            _ => {
                let status = self.status_code();
                let body = ErrorAck {
                    success: false,
                    message: self.to_string(),
                };
                let mut response = axum::Json(body).into_response();
                *response.status_mut() = status;
                response
            }
        }
    }
}
