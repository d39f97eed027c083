//! # oms-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the organization service.
//! Binds to configurable port (default 8080).

use anyhow::Context;
use oms_api::config::{AppConfig, LogFormat};
use oms_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let port = config.port;
    let state = AppState::with_config(config).map_err(|e| {
        tracing::error!("Contract registry construction failed: {e}");
        e
    })?;
    let app = oms_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("OMS API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
