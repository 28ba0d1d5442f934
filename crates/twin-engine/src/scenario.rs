// ABOUTME: Scenario impact calculator combining routed travel time and hotspot exposure
// ABOUTME: Never fails; routing and spatial failures degrade to deterministic heuristics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scenario Impact Calculator
//!
//! Evaluates one [`InterventionRequest`] against the shared road network and
//! hotspot dataset. Both datasets are optional; whatever is missing is
//! replaced by a bounded heuristic so a result is always produced.
//!
//! Traffic: routed baseline vs. routed scenario (with the intervention as an
//! overlay edge), else `-min(20, length * lanes * 0.6)` minutes.
//!
//! Flood: hotspots inside a buffer around the path, else a length times
//! rainfall rule. Cells and population are rounded half-to-even.

use crate::constants::geodesy::SECONDS_PER_MINUTE;
use crate::constants::scenario::{
    BASELINE_POPULATION, BASELINE_RISK_CELLS, DEFAULT_HOTSPOT_BUFFER_METERS,
    DEFAULT_OVERLAY_SPEED_KMH, DRAIN_CELLS_PER_KM, GREEN_CELLS_PER_KM,
    HEURISTIC_MINUTES_PER_LANE_KM, MAX_HEURISTIC_TRAFFIC_MINUTES, MIN_RAINFALL_FACTOR,
    RAINFALL_NORMALIZATION_MM, RESTRICTION_CELLS_PER_KM, ROAD_CELLS_PER_KM,
};
use crate::errors::{RoutingError, SpatialError};
use crate::geodesy::polyline_length_km;
use crate::models::{
    FloodImpact, FloodMethod, Hotspot, InterventionRequest, InterventionType, ScenarioResult,
    TrafficImpact, TrafficMethod,
};
use crate::network::WeightedNetwork;
use crate::router::{nearest_node, shortest_travel_time, OverlayEdge};
use crate::spatial::hotspots_within_buffer;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;

/// Tunables for the calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConfig {
    /// Speed assigned to the overlay edge of a new road (km/h)
    pub overlay_speed_kmh: f64,
    /// Buffer around the intervention path for hotspot counting (m)
    pub hotspot_buffer_meters: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            overlay_speed_kmh: DEFAULT_OVERLAY_SPEED_KMH,
            hotspot_buffer_meters: DEFAULT_HOTSPOT_BUFFER_METERS,
        }
    }
}

/// Outcome of the traffic branch
#[derive(Debug, Clone, PartialEq)]
pub enum TrafficEstimate {
    /// Both routes resolved
    Routed {
        /// Travel time without the intervention (s)
        baseline_seconds: f64,
        /// Travel time with the intervention (s)
        scenario_seconds: f64,
    },
    /// A route could not be computed
    Unroutable(RoutingError),
    /// No origin/destination in the request
    NotRequested,
}

/// Outcome of the flood branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloodEstimate {
    /// Hotspots counted inside the path buffer
    Spatial {
        /// Number of hotspots in the buffer
        hotspots_in_buffer: usize,
    },
    /// No dataset, no path, or a degenerate path
    Heuristic,
}

/// What-if calculator over injected read-only datasets
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    network: Option<Arc<WeightedNetwork>>,
    hotspots: Option<Arc<[Hotspot]>>,
    config: ScenarioConfig,
}

impl ScenarioEngine {
    /// Create an engine over whatever datasets were loaded
    #[must_use]
    pub const fn new(
        network: Option<Arc<WeightedNetwork>>,
        hotspots: Option<Arc<[Hotspot]>>,
        config: ScenarioConfig,
    ) -> Self {
        Self {
            network,
            hotspots,
            config,
        }
    }

    /// Road network, if loaded
    #[must_use]
    pub fn network(&self) -> Option<&WeightedNetwork> {
        self.network.as_deref()
    }

    /// Hotspot dataset, if loaded
    #[must_use]
    pub fn hotspots(&self) -> Option<&[Hotspot]> {
        self.hotspots.as_deref()
    }

    /// Calculator settings
    #[must_use]
    pub const fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Evaluate one intervention
    #[must_use]
    pub fn simulate(&self, request: &InterventionRequest) -> ScenarioResult {
        let length_km = request
            .approx_length
            .unwrap_or_else(|| polyline_length_km(&request.road_points));

        let traffic_estimate = self.estimate_traffic(request, length_km);
        let flood_estimate = self.estimate_flood(request);

        let mut notes = format!("Intervention length {length_km:.2} km.");
        if let TrafficEstimate::Unroutable(error) = &traffic_estimate {
            let _ = write!(notes, " Travel time estimated heuristically ({error}).");
        }
        if flood_estimate == FloodEstimate::Heuristic {
            notes.push_str(" Flood impact estimated from length and rainfall.");
        }

        let result = ScenarioResult {
            traffic: traffic_impact(traffic_estimate, request, length_km),
            flood: flood_impact(flood_estimate, request, length_km),
            notes,
        };

        debug!(
            scenario = request.scenario_name.as_deref().unwrap_or("unnamed"),
            intervention = %request.intervention_type,
            traffic_method = ?result.traffic.method,
            flood_method = ?result.flood.method,
            "Scenario simulated"
        );
        result
    }

    /// Route baseline and scenario for the request's commute
    #[must_use]
    pub fn estimate_traffic(&self, request: &InterventionRequest, length_km: f64) -> TrafficEstimate {
        let (Some(origin), Some(destination)) = (request.origin, request.destination) else {
            return TrafficEstimate::NotRequested;
        };
        let network = self.network();

        let routed = shortest_travel_time(network, &origin, &destination, &[]).and_then(
            |baseline_seconds| {
                let scenario_seconds = match self.overlay_for(request, length_km)? {
                    Some(edge) => shortest_travel_time(network, &origin, &destination, &[edge])?,
                    None => baseline_seconds,
                };
                Ok(TrafficEstimate::Routed {
                    baseline_seconds,
                    scenario_seconds,
                })
            },
        );

        routed.unwrap_or_else(|error| {
            debug!(%error, "Routing failed, falling back to traffic heuristic");
            TrafficEstimate::Unroutable(error)
        })
    }

    /// Overlay edge joining the nodes nearest to the path ends
    fn overlay_for(
        &self,
        request: &InterventionRequest,
        length_km: f64,
    ) -> Result<Option<OverlayEdge>, RoutingError> {
        let (Some(first), Some(last)) = (request.road_points.first(), request.road_points.last())
        else {
            return Ok(None);
        };
        let network = self.network();
        Ok(Some(OverlayEdge {
            from: nearest_node(network, first)?,
            to: nearest_node(network, last)?,
            length_km,
            speed_kmh: self.config.overlay_speed_kmh,
        }))
    }

    /// Count hotspots along the path when the dataset allows it
    #[must_use]
    pub fn estimate_flood(&self, request: &InterventionRequest) -> FloodEstimate {
        let Some(hotspots) = self.hotspots() else {
            return FloodEstimate::Heuristic;
        };
        if request.road_points.is_empty() {
            return FloodEstimate::Heuristic;
        }
        match hotspots_within_buffer(
            hotspots,
            &request.road_points,
            self.config.hotspot_buffer_meters,
        ) {
            Ok(found) => FloodEstimate::Spatial {
                hotspots_in_buffer: found.len(),
            },
            Err(error @ SpatialError::EmptyGeometry { .. }) => {
                debug!(%error, "Path buffer unavailable, falling back to flood heuristic");
                FloodEstimate::Heuristic
            }
        }
    }
}

fn traffic_impact(
    estimate: TrafficEstimate,
    request: &InterventionRequest,
    length_km: f64,
) -> TrafficImpact {
    match estimate {
        TrafficEstimate::Routed {
            baseline_seconds,
            scenario_seconds,
        } => {
            let baseline = baseline_seconds / SECONDS_PER_MINUTE;
            let scenario = scenario_seconds / SECONDS_PER_MINUTE;
            TrafficImpact {
                minutes_change: scenario - baseline,
                baseline_minutes: Some(baseline),
                scenario_minutes: Some(scenario),
                method: TrafficMethod::Routed,
            }
        }
        TrafficEstimate::Unroutable(_) => TrafficImpact {
            minutes_change: heuristic_minutes_change(
                request.intervention_type,
                length_km,
                request.effective_lanes(),
            ),
            baseline_minutes: None,
            scenario_minutes: None,
            method: TrafficMethod::Heuristic,
        },
        TrafficEstimate::NotRequested => TrafficImpact {
            minutes_change: 0.0,
            baseline_minutes: None,
            scenario_minutes: None,
            method: TrafficMethod::NotRequested,
        },
    }
}

/// Travel-time change when routing is impossible
///
/// Capacity added saves up to 20 minutes; a restriction costs half that.
#[must_use]
pub fn heuristic_minutes_change(intervention: InterventionType, length_km: f64, lanes: u32) -> f64 {
    let saved = (length_km * f64::from(lanes) * HEURISTIC_MINUTES_PER_LANE_KM)
        .min(MAX_HEURISTIC_TRAFFIC_MINUTES);
    match intervention {
        InterventionType::Restriction => saved.abs() / 2.0,
        _ => -saved,
    }
}

fn flood_impact(estimate: FloodEstimate, request: &InterventionRequest, length_km: f64) -> FloodImpact {
    let (delta, hotspots_in_buffer, method) = match estimate {
        FloodEstimate::Spatial { hotspots_in_buffer } => (
            spatial_cell_delta(request.intervention_type, hotspots_in_buffer),
            Some(hotspots_in_buffer),
            FloodMethod::Spatial,
        ),
        FloodEstimate::Heuristic => (
            heuristic_cell_delta(request.intervention_type, length_km, request.rainfall),
            None,
            FloodMethod::Heuristic,
        ),
    };

    let scenario_cells = u32::try_from(
        i64::from(BASELINE_RISK_CELLS)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)),
    )
    .unwrap_or(u32::MAX);
    // float to int casts saturate, so extreme inputs pin the population at u32::MAX
    let scenario_pop = (f64::from(BASELINE_POPULATION) * f64::from(scenario_cells)
        / f64::from(BASELINE_RISK_CELLS))
    .round_ties_even() as u32;

    FloodImpact {
        baseline_high_risk_cells: BASELINE_RISK_CELLS,
        scenario_high_risk_cells: scenario_cells,
        baseline_pop: BASELINE_POPULATION,
        scenario_pop,
        hotspots_in_buffer,
        method,
    }
}

/// Risk-cell change from hotspots inside the path buffer
#[must_use]
pub fn spatial_cell_delta(intervention: InterventionType, hotspots_in_buffer: usize) -> i64 {
    let count = i64::try_from(hotspots_in_buffer).unwrap_or(i64::MAX / 2);
    match intervention {
        InterventionType::Road => count,
        InterventionType::Green => -count,
        InterventionType::Drain | InterventionType::Restriction => -2 * count,
    }
}

/// Risk-cell change from length and rainfall
#[must_use]
pub fn heuristic_cell_delta(intervention: InterventionType, length_km: f64, rainfall_mm: f64) -> i64 {
    let rainfall_factor = (rainfall_mm / RAINFALL_NORMALIZATION_MM).max(MIN_RAINFALL_FACTOR);
    let (cells_per_km, sign) = match intervention {
        InterventionType::Road => (ROAD_CELLS_PER_KM, 1),
        InterventionType::Drain => (DRAIN_CELLS_PER_KM, -1),
        InterventionType::Green => (GREEN_CELLS_PER_KM, -1),
        InterventionType::Restriction => (RESTRICTION_CELLS_PER_KM, -1),
    };
    sign * (length_km * rainfall_factor * cells_per_km).round_ties_even() as i64
}
