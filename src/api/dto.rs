//! Response body for acknowledged webhooks.

use serde::{Deserialize, Serialize};

use crate::domain::EntryId;

/// JSON acknowledgement returned when a webhook was persisted.
///
/// ```json
/// { "success": true, "message": "Webhook processado", "entryId": 42 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always `true` on the success path.
    pub success: bool,
    /// Fixed acknowledgement text.
    pub message: String,
    /// Identifier the storage layer assigned to the new record.
    #[serde(rename = "entryId")]
    pub entry_id: EntryId,
}
