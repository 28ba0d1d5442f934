// ABOUTME: Flood alert routes: alerts for a given rainfall and multi-horizon forecasts
// ABOUTME: Query parameters are validated here; alert logic lives in the forecast service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::resources::ServerResources;
use crate::services::DEFAULT_HORIZONS;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use twin_core::models::{BoundingBox, GeoPoint};

/// Query of `GET /api/flood/forecast`
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    /// Latitude, paired with `lng`
    pub lat: Option<f64>,
    /// Longitude, paired with `lat`
    pub lng: Option<f64>,
    /// `minLng,minLat,maxLng,maxLat`
    pub bbox: Option<String>,
}

/// Query of `GET /api/flood/alert`
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Rainfall amount (mm)
    pub rainfall: f64,
    /// `minLng,minLat,maxLng,maxLat`
    pub bbox: Option<String>,
}

/// Flood routes implementation
pub struct FloodRoutes;

impl FloodRoutes {
    /// Create flood routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/flood/forecast", get(Self::handle_forecast))
            .route("/api/flood/alert", get(Self::handle_alert))
            .with_state(resources)
    }

    /// Handle GET /api/flood/forecast
    async fn handle_forecast(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ForecastQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query.map_err(Self::rejection)?;
        let point = match (query.lat, query.lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng)?,
            (None, None) => resources.config.forecast.default_point,
            _ => {
                return Err(AppError::invalid_input(
                    "lat and lng must be given together",
                ))
            }
        };
        let bbox = parse_bbox(query.bbox.as_deref())?;

        let alerts = resources
            .forecast
            .get_flood_forecast(&point, &DEFAULT_HORIZONS, bbox.as_ref())
            .await?;

        Ok((StatusCode::OK, Json(alerts)).into_response())
    }

    /// Handle GET /api/flood/alert
    async fn handle_alert(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<AlertQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query.map_err(Self::rejection)?;
        let bbox = parse_bbox(query.bbox.as_deref())?;

        let alert = resources
            .forecast
            .alert_for_rainfall(query.rainfall, bbox.as_ref())?;

        Ok((StatusCode::OK, Json(alert)).into_response())
    }

    fn rejection(rejection: QueryRejection) -> AppError {
        AppError::new(ErrorCode::InvalidFormat, rejection.body_text())
    }
}

/// Parse an optional `minLng,minLat,maxLng,maxLat` parameter
///
/// # Errors
///
/// Invalid input when the value is not four comma-separated numbers
pub fn parse_bbox(raw: Option<&str>) -> AppResult<Option<BoundingBox>> {
    raw.map(str::parse).transpose()
}
