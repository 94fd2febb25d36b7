//! Domain types: webhook record derivation and storage identifiers.

pub mod record;

pub use record::{EntryId, StoredWebhook, WebhookRecord};
