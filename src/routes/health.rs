// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness plus readiness that reports which datasets are loaded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process serves requests. `/ready`
//! reports `degraded` when a dataset failed to load; the server still
//! answers, with heuristics or "unavailable" errors in place of the
//! missing data.

use crate::resources::ServerResources;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use twin_engine::WeightedNetwork;

/// Readiness payload
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// `ready` or `degraded`
    pub status: &'static str,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Dataset availability
    pub datasets: DatasetStatus,
    /// Rainfall provider name
    pub rainfall_provider: &'static str,
}

/// Per-dataset availability
#[derive(Debug, Serialize)]
pub struct DatasetStatus {
    /// Hotspot count, absent when not loaded
    pub hotspots: Option<usize>,
    /// Road network node count, absent when not loaded
    pub road_network_nodes: Option<usize>,
    /// Road network edge count, absent when not loaded
    pub road_network_edges: Option<usize>,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<ReadinessResponse> {
        let network = resources.datasets.network.as_deref();
        let datasets = DatasetStatus {
            hotspots: resources.datasets.hotspot_count(),
            road_network_nodes: network.map(WeightedNetwork::node_count),
            road_network_edges: network.map(WeightedNetwork::edge_count),
        };
        let status = if datasets.hotspots.is_some() && datasets.road_network_nodes.is_some() {
            "ready"
        } else {
            "degraded"
        };

        Json(ReadinessResponse {
            status,
            timestamp: Utc::now().to_rfc3339(),
            datasets,
            rainfall_provider: resources.forecast.provider_name(),
        })
    }
}
