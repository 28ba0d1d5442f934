// ABOUTME: Route module organization for the digital twin HTTP endpoints
// ABOUTME: Route definitions grouped by domain, each delegating to engine or service calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes.
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the scenario engine or the service layer.

/// Flood alert and forecast routes
pub mod flood;
/// Health check and readiness routes
pub mod health;
/// Scenario simulation routes
pub mod scenario;

pub use flood::FloodRoutes;
pub use health::HealthRoutes;
pub use scenario::ScenarioRoutes;
