// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::refresher::Refresher;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_source::HttpDashboardSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_page, health_check, state_snapshot};
use crate::presentation::render::RenderOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let addr = config.listen_addr()?;

    // Create source (infrastructure layer)
    let source = Arc::new(HttpDashboardSource::new(
        config.backend.base_url.clone(),
        config.request_timeout(),
    )?);
    tracing::info!("Polling backend at {}", source.base_url());

    // Create refresher (application layer)
    let refresher = Arc::new(Refresher::new(
        source,
        config.refresh_interval(),
        config.refresh.update_policy,
    ));
    refresher.start().await;

    // Create application state
    let state = Arc::new(AppState {
        refresher: refresher.clone(),
        render_options: RenderOptions {
            page_refresh_secs: config.server.page_refresh_secs,
        },
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(dashboard_page))
        .route("/state", get(state_snapshot))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!("Starting OpenClaw dashboard on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
