//! Product composite HTTP server.

use anyhow::Context;
use product_composite::api::rest::{AppState, create_router};
use product_composite::config::AppConfig;
use product_composite::infrastructure::sources::build_registry;
use product_composite::telemetry;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    let registry = build_registry(&config.sources).context("failed to build source registry")?;
    let state = Arc::new(AppState::from_config(&config, registry));
    let app = create_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        sources = ?config.sources.enabled(),
        sort_key = %config.aggregation.sort_key,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
