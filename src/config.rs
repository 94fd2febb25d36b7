//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Storage credentials are deliberately
//! optional at load time: a gateway started without them still serves
//! requests, rejecting each one with a configuration error until the
//! environment is corrected.

use std::net::SocketAddr;

use anyhow::Context;

/// Default table receiving one row per webhook.
pub const DEFAULT_TABLE: &str = "webhooks";

/// Credentials for the Supabase-style storage backend.
#[derive(Debug, Clone)]
pub struct StorageCredentials {
    /// Project endpoint URL, without a trailing slash (e.g.
    /// `https://abc.supabase.co`).
    pub endpoint: String,
    /// Service-level secret key, sent as both `apikey` and bearer token.
    pub service_key: String,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Storage credentials, `None` when either variable is unset or empty.
    pub storage: Option<StorageCredentials>,

    /// Name of the table webhook records are inserted into.
    pub table: String,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads `LISTEN_ADDR`, `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`,
    /// and `WEBHOOK_TABLE`. Calls `dotenvy::dotenv().ok()` to optionally
    /// load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("invalid LISTEN_ADDR")?;

        let storage = storage_credentials(
            non_empty_env("SUPABASE_URL"),
            non_empty_env("SUPABASE_SERVICE_ROLE_KEY"),
        );

        let table =
            std::env::var("WEBHOOK_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());

        Ok(Self {
            listen_addr,
            storage,
            table,
        })
    }
}

/// Pairs endpoint and key into credentials; either missing yields `None`.
///
/// A trailing slash on the endpoint is stripped so URL composition in the
/// storage client stays predictable.
fn storage_credentials(
    endpoint: Option<String>,
    service_key: Option<String>,
) -> Option<StorageCredentials> {
    let endpoint = endpoint?;
    let service_key = service_key?;
    Some(StorageCredentials {
        endpoint: endpoint.trim_end_matches('/').to_string(),
        service_key,
    })
}

/// Reads an environment variable, treating empty values as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
