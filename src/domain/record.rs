//! Webhook record derivation from arbitrary inbound payloads.
//!
//! Payloads are open-ended JSON: the provider may add fields at any time,
//! so nothing beyond the two accessed fields is typed. The full payload is
//! preserved verbatim in the record for audit.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Substituted for `event` when `event_type` is absent or falsy.
pub const FALLBACK_EVENT: &str = "unknown_event";

/// Substituted for `email` when `customer.email` is absent or falsy.
pub const FALLBACK_EMAIL: &str = "no_email";

/// Status every record carries at creation time.
pub const INITIAL_STATUS: &str = "received";

/// The row written to storage, derived from one inbound payload.
///
/// Created exactly once per successful request and never mutated by the
/// gateway; the `id` is assigned by the storage layer and only known once
/// the insert returns (see [`StoredWebhook`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRecord {
    /// Full inbound payload, stored verbatim as the audit trail.
    pub payload: Value,
    /// `event_type` from the payload, or [`FALLBACK_EVENT`].
    pub event: String,
    /// `customer.email` from the payload, or [`FALLBACK_EMAIL`].
    pub email: String,
    /// Always [`INITIAL_STATUS`] at creation time.
    pub status: String,
}

impl WebhookRecord {
    /// Derives a record from an arbitrary JSON payload.
    ///
    /// Missing, null, empty-string, or non-string values for the two
    /// extracted fields all take the fallback, matching the loose truthiness
    /// semantics of the upstream contract.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        let event = non_empty_str(payload.get("event_type"))
            .unwrap_or(FALLBACK_EVENT)
            .to_string();

        let email = non_empty_str(payload.get("customer").and_then(|c| c.get("email")))
            .unwrap_or(FALLBACK_EMAIL)
            .to_string();

        Self {
            payload,
            event,
            email,
            status: INITIAL_STATUS.to_string(),
        }
    }
}

/// Extracts a non-empty string, treating everything else as falsy.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Storage-assigned row identifier.
///
/// The backend decides the column type, so both integer and string ids
/// are accepted and echoed back to the sender unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// Numeric identifier (bigserial-style column).
    Number(i64),
    /// String identifier (uuid-style column).
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A record as returned by the storage layer after insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredWebhook {
    /// Identifier assigned by the storage backend.
    pub id: EntryId,
    /// The inserted record fields, echoed back.
    #[serde(flatten)]
    pub record: WebhookRecord,
    /// Creation timestamp set by the storage layer, when the table has one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
