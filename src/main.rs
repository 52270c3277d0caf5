//! Service entry point: load configuration, wire dependencies, serve.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use premium_gate::adapters::http::{app, WebhookAppState};
use premium_gate::adapters::supabase::{SupabaseProfileStore, SupabaseStoreConfig};
use premium_gate::config::AppConfig;
use premium_gate::domain::webhook::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration faults are deployment faults: refuse to boot rather
    // than serve deliveries that can only 500.
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let state = WebhookAppState {
        verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
        profile_store: Arc::new(SupabaseProfileStore::new(SupabaseStoreConfig::from(
            &config.supabase,
        ))),
    };

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "premium-gate listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
