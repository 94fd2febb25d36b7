//! Supabase REST implementation of the persistence layer.
//!
//! Inserts go through the PostgREST endpoint of the project
//! (`{endpoint}/rest/v1/{table}`) authenticated with the service-level
//! key. `Prefer: return=representation` together with the PostgREST
//! single-object `Accept` header asks the backend to return exactly the
//! inserted row.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use super::WebhookStore;
use crate::config::StorageCredentials;
use crate::domain::{StoredWebhook, WebhookRecord};
use crate::error::GatewayError;

/// PostgREST media type that returns a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body shape returned by PostgREST.
#[derive(Debug, Deserialize)]
struct RestError {
    message: String,
}

/// Supabase-backed store using the project's REST endpoint.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    credentials: StorageCredentials,
    table: String,
}

impl SupabaseStore {
    /// Creates a store bound to the given credentials and table.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be
    /// constructed (TLS backend initialization failure).
    pub fn new(credentials: StorageCredentials, table: String) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        Ok(Self {
            http,
            credentials,
            table,
        })
    }

    /// REST URL of the target table.
    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.credentials.endpoint, self.table)
    }

    /// Extracts the PostgREST error message from a failed response body.
    fn error_message(status: StatusCode, body: &str) -> String {
        match serde_json::from_str::<RestError>(body) {
            Ok(rest) => rest.message,
            Err(_) if !body.is_empty() => body.to_string(),
            Err(_) => format!("storage returned status {status}"),
        }
    }
}

#[async_trait::async_trait]
impl WebhookStore for SupabaseStore {
    async fn insert_returning(
        &self,
        record: WebhookRecord,
    ) -> Result<StoredWebhook, GatewayError> {
        let response = self
            .http
            .post(self.rest_url())
            .header("apikey", &self.credentials.service_key)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.credentials.service_key),
            )
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            // PostgREST inserts take an array of rows; always a batch of one.
            .json(&[record])
            .send()
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Storage(Self::error_message(status, &body)));
        }

        response
            .json::<StoredWebhook>()
            .await
            .map_err(|e| GatewayError::Storage(format!("invalid storage response: {e}")))
    }
}
