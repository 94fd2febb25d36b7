//! Persistence layer: one append-only table of webhook records.
//!
//! [`WebhookStore`] is the seam between the handler and the storage
//! backend, so tests can substitute a fake store. The concrete
//! implementation speaks the Supabase (PostgREST) REST wire contract
//! over `reqwest`.

pub mod supabase;

use async_trait::async_trait;

use crate::domain::{StoredWebhook, WebhookRecord};
use crate::error::GatewayError;

/// Storage abstraction: insert one record, return the inserted row.
#[async_trait]
pub trait WebhookStore: Send + Sync + std::fmt::Debug {
    /// Inserts `record` as a single-element batch and returns the row as
    /// stored, including its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] when the backend rejects or fails
    /// the insert. A failed insert is not retried.
    async fn insert_returning(&self, record: WebhookRecord)
    -> Result<StoredWebhook, GatewayError>;
}
