// ABOUTME: Domain models shared across the engine, providers, and HTTP layer
// ABOUTME: Geographic primitives, hotspots, intervention requests, scenario results, alerts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Alert severity, alert payload, and rainfall samples
pub mod alert;
/// `GeoPoint` and `BoundingBox`
pub mod geo;
/// Flood hotspot records
pub mod hotspot;
/// Intervention requests and scenario results
pub mod scenario;

pub use alert::{Alert, RainfallSample, Severity};
pub use geo::{BoundingBox, GeoPoint};
pub use hotspot::Hotspot;
pub use scenario::{
    FloodImpact, FloodMethod, InterventionRequest, InterventionType, ScenarioResult,
    TrafficImpact, TrafficMethod,
};
