// ABOUTME: Scenario simulation route: what-if impact of a proposed intervention
// ABOUTME: Validates the request and runs the engine on the blocking pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, ErrorCode};
use crate::resources::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use std::sync::Arc;
use tokio::task;
use tracing::info;
use twin_core::models::InterventionRequest;

/// Scenario routes implementation
pub struct ScenarioRoutes;

impl ScenarioRoutes {
    /// Create scenario routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/disaster/simulate", post(Self::handle_simulate))
            .with_state(resources)
    }

    /// Handle POST /api/disaster/simulate
    async fn handle_simulate(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<InterventionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            payload.map_err(|e| AppError::new(ErrorCode::InvalidFormat, e.body_text()))?;
        request.validate()?;

        info!(
            scenario = request.scenario_name.as_deref().unwrap_or("unnamed"),
            intervention = %request.intervention_type,
            rainfall_mm = request.rainfall,
            "Simulating scenario"
        );

        // Routing over a city-sized network is CPU bound
        let engine = resources.engine.clone();
        let result = task::spawn_blocking(move || engine.simulate(&request))
            .await
            .map_err(|e| AppError::internal(format!("Scenario task failed: {e}")))?;

        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
