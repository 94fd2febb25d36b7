//! webhook-gateway server entry point.
//!
//! Starts the Axum HTTP server with the catch-all webhook endpoint.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use webhook_gateway::api;
use webhook_gateway::app_state::AppState;
use webhook_gateway::config::GatewayConfig;
use webhook_gateway::persistence::WebhookStore;
use webhook_gateway::persistence::supabase::SupabaseStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, table = %config.table, "starting webhook-gateway");

    // Build storage backend. A missing configuration is a per-request
    // error, not a startup failure, so the server boots either way.
    let store: Option<Arc<dyn WebhookStore>> = match config.storage.clone() {
        Some(credentials) => Some(Arc::new(SupabaseStore::new(
            credentials,
            config.table.clone(),
        )?)),
        None => {
            tracing::warn!("storage credentials not configured; all webhooks will be rejected");
            None
        }
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
