// ABOUTME: HTTP server assembly: merges domain routes and applies the middleware stack
// ABOUTME: Binds the listener and serves until a shutdown signal arrives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::middleware::{make_request_span, setup_cors, RequestIdGenerator};
use crate::resources::ServerResources;
use crate::routes::{FloodRoutes, HealthRoutes, ScenarioRoutes};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::Router;
use std::future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router with all routes and middleware
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ScenarioRoutes::routes(Arc::clone(&resources)))
        .merge(FloodRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
                .layer(cors),
        )
}

/// Serve on an already bound listener until shutdown
///
/// # Errors
///
/// Returns an error if the server fails while serving
pub async fn serve_listener(listener: TcpListener, resources: Arc<ServerResources>) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("Digital twin server listening on http://{local_addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

/// Bind the configured address and serve
///
/// # Errors
///
/// Returns an error if the address cannot be bound or serving fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = resources.config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    serve_listener(listener, resources).await
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        // serve until the process is killed
        future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
