// ABOUTME: Intervention request and scenario result models for the what-if simulation API
// ABOUTME: Wire format is camelCase to match the map front-end payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::geo::GeoPoint;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of urban intervention being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionType {
    /// New or widened road
    Road,
    /// Storm drain
    Drain,
    /// Green infrastructure (bioswales, parks, permeable surfaces)
    Green,
    /// Traffic restriction
    Restriction,
}

impl InterventionType {
    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Drain => "drain",
            Self::Green => "green",
            Self::Restriction => "restriction",
        }
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single what-if request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRequest {
    /// Free-form label, only used for logging
    #[serde(default)]
    pub scenario_name: Option<String>,
    /// What is being built or restricted
    pub intervention_type: InterventionType,
    /// Rainfall assumption for the flood heuristic (mm)
    pub rainfall: f64,
    /// Explicit intervention length (km)
    #[serde(default)]
    pub approx_length: Option<f64>,
    /// Number of lanes for road-like interventions
    #[serde(default)]
    pub lanes: Option<u32>,
    /// Intervention path
    #[serde(default)]
    pub road_points: Vec<GeoPoint>,
    /// Commute origin
    #[serde(default)]
    pub origin: Option<GeoPoint>,
    /// Commute destination
    #[serde(default)]
    pub destination: Option<GeoPoint>,
}

impl InterventionRequest {
    /// Minimal request with no path and no commute
    #[must_use]
    pub const fn new(intervention_type: InterventionType, rainfall: f64) -> Self {
        Self {
            scenario_name: None,
            intervention_type,
            rainfall,
            approx_length: None,
            lanes: None,
            road_points: Vec::new(),
            origin: None,
            destination: None,
        }
    }

    /// Lane count, defaulting to one
    #[must_use]
    pub fn effective_lanes(&self) -> u32 {
        self.lanes.unwrap_or(1)
    }

    /// Check the request invariants before it reaches the engine
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if !self.rainfall.is_finite() || self.rainfall < 0.0 {
            return Err(AppError::invalid_input(format!(
                "rainfall must be a non-negative number, got {}",
                self.rainfall
            )));
        }
        if let Some(length) = self.approx_length {
            if !length.is_finite() || length <= 0.0 {
                return Err(AppError::invalid_input(format!(
                    "approxLength must be positive, got {length}"
                )));
            }
        }
        if self.lanes == Some(0) {
            return Err(AppError::invalid_input("lanes must be at least 1"));
        }
        if let Some(point) = self.road_points.iter().find(|p| !p.is_valid()) {
            return Err(AppError::invalid_input(format!(
                "roadPoints contains an invalid coordinate {point}"
            )));
        }
        for (field, point) in [("origin", self.origin), ("destination", self.destination)] {
            if let Some(point) = point.filter(|p| !p.is_valid()) {
                return Err(AppError::invalid_input(format!(
                    "{field} is not a valid coordinate {point}"
                )));
            }
        }
        Ok(())
    }
}

/// How the traffic delta was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficMethod {
    /// Shortest-path routing on the road network
    Routed,
    /// Length/lanes heuristic after a routing failure
    Heuristic,
    /// No origin/destination supplied
    NotRequested,
}

/// How the flood delta was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodMethod {
    /// Hotspots counted inside the path buffer
    Spatial,
    /// Length/rainfall heuristic
    Heuristic,
}

/// Commute impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficImpact {
    /// Scenario minus baseline travel time (negative means faster)
    pub minutes_change: f64,
    /// Routed baseline travel time
    pub baseline_minutes: Option<f64>,
    /// Routed travel time with the intervention
    pub scenario_minutes: Option<f64>,
    /// Estimation method
    pub method: TrafficMethod,
}

/// Flood exposure impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodImpact {
    /// Reference count of high-risk cells
    pub baseline_high_risk_cells: u32,
    /// High-risk cells after the intervention
    pub scenario_high_risk_cells: u32,
    /// Reference exposed population
    pub baseline_pop: u32,
    /// Exposed population after the intervention
    pub scenario_pop: u32,
    /// Hotspots found inside the path buffer (spatial method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspots_in_buffer: Option<usize>,
    /// Estimation method
    pub method: FloodMethod,
}

/// Outcome of one scenario simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Commute impact
    pub traffic: TrafficImpact,
    /// Flood exposure impact
    pub flood: FloodImpact,
    /// Human-readable summary
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = serde_json::json!({
            "scenarioName": "Musi bridge",
            "interventionType": "drain",
            "rainfall": 40,
            "approxLength": 2.0,
            "roadPoints": [{"lat": 17.38, "lng": 78.48}]
        });

        let request: InterventionRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.intervention_type, InterventionType::Drain);
        assert_eq!(request.approx_length, Some(2.0));
        assert_eq!(request.road_points.len(), 1);
        assert_eq!(request.effective_lanes(), 1);
        assert!(request.origin.is_none());
    }

    #[test]
    fn test_request_validation() {
        let mut request = InterventionRequest::new(InterventionType::Road, 10.0);
        assert!(request.validate().is_ok());

        request.rainfall = -1.0;
        assert!(request.validate().is_err());

        request.rainfall = 10.0;
        request.lanes = Some(0);
        assert!(request.validate().is_err());

        request.lanes = Some(2);
        request.approx_length = Some(0.0);
        assert!(request.validate().is_err());

        request.approx_length = None;
        request.origin = Some(GeoPoint {
            lat: 95.0,
            lng: 0.0,
        });
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_intervention_type_rejected() {
        let json = serde_json::json!({"interventionType": "tunnel", "rainfall": 5});
        assert!(serde_json::from_value::<InterventionRequest>(json).is_err());
    }
}
