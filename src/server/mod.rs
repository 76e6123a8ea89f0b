//! HTTP server for the item registry
//!
//! This module provides the main HTTP server with:
//! - Welcome message at /
//! - Health check at /health
//! - Item CRUD at /items

use anyhow::{Context, Result};
use axum::{middleware::from_fn, response::IntoResponse, routing::get, Json, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::models::WelcomeMessage;

pub mod middleware;
pub mod routes;
pub mod state;

use state::ServerState;

/// Create the main application router
pub fn create_app(state: ServerState) -> Router {
    let cors_config = state.config.cors.clone();
    let timeout_duration = Duration::from_secs(state.config.request_timeout_secs);

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::items::create_router())
        .layer(from_fn(middleware::logging_middleware))
        .layer(TimeoutLayer::new(timeout_duration))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // CORS should be outermost
    if cors_config.enabled {
        app = app.layer(middleware::cors_layer(&cors_config));
    }

    app
}

async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage::default())
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "simple-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(addr: SocketAddr, state: ServerState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve(listener, state).await
}

/// Serve on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<()> {
    let app = create_app(state);

    info!("Starting Simple API server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
