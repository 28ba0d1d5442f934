// ABOUTME: Scenario impact engine crate root
// ABOUTME: Geodesy, weighted network routing, spatial hotspot queries, scenario and alert logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Twin Engine
//!
//! Pure, synchronous algorithms behind the digital twin service. Nothing in
//! this crate performs I/O; datasets are handed in already loaded and are
//! only ever read.

pub use twin_core::{constants, errors, models};

/// Rainfall-to-alert mapping
pub mod alerts;
/// Horizon summation over hourly rainfall samples
pub mod forecast;
/// Distances, lengths, and projection
pub mod geodesy;
/// Read-only weighted road network
pub mod network;
/// Shortest travel time with request-scoped overlays
pub mod router;
/// What-if calculator
pub mod scenario;
/// Hotspot buffer and bounding-box queries
pub mod spatial;

pub use alerts::{activation_fraction, classify_severity, generate_alert};
pub use forecast::{forecast_rainfall, parse_feed_timestamp, samples_from_feed};
pub use network::{NetworkBuilder, NetworkRecords, WeightedNetwork};
pub use router::{nearest_node, shortest_travel_time, Overlay, OverlayEdge};
pub use scenario::{ScenarioConfig, ScenarioEngine, TrafficEstimate};
pub use spatial::{hotspots_in_bounding_box, hotspots_within_buffer};
