//! Action Button Code Generation HTTP Server
//!
//! Provides the REST API for generating O9 action button scripts.

use abforge_server::config::ServerConfig;
use abforge_server::{api, state};
use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    // Load and validate configuration; missing required values kill the
    // process here with a clear diagnostic
    let config = ServerConfig::load()?;
    config.validate()?;
    info!(
        "Loaded configuration: host={} port={} store={} provider={:?}",
        config.host,
        config.port,
        match &config.store {
            abforge_server::config::StoreConfig::Memory => "memory",
            abforge_server::config::StoreConfig::Api { .. } => "api",
        },
        config.llm.provider
    );

    // Construct stores and the completion client once, injected everywhere
    let app_state = state::build_state(&config)?;

    let app = api::create_router(app_state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Generation API: POST http://{}/generate", addr);
    info!("  Bindings API: http://{}/bindings", addr);
    info!("  Knowledge base: http://{}/knowledge", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "abforge_server=info,abforge_store=info,abforge_llm=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
