//! # webhook-gateway
//!
//! HTTP ingestion gateway for payment-provider webhook callbacks.
//!
//! The gateway exposes a single method-gated endpoint: any path receiving a
//! `POST` is treated as a webhook delivery. The JSON payload is normalized
//! into a [`domain::WebhookRecord`], persisted through a Supabase-style REST
//! storage backend, and acknowledged with a JSON response. Non-`POST`
//! requests are rejected with `405` before any body handling.
//!
//! ## Architecture
//!
//! ```text
//! Webhook sender (HTTP POST, any path)
//!     │
//!     ├── Webhook Handler (api/)
//!     │       │
//!     │       ├── WebhookRecord derivation (domain/)
//!     │       └── WebhookStore (persistence/)
//!     │               │
//!     │               └── Supabase REST (PostgREST insert)
//!     │
//!     └── JSON acknowledgement (200 / 500) or 405
//! ```
//!
//! One storage write per request, no retries, no deduplication: the sender
//! is expected to retry the whole HTTP request when it treats a 500 as
//! transient.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
