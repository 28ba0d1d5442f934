// ABOUTME: Main library entry point for the digital twin scenario and flood alert server
// ABOUTME: Wires datasets, the scenario engine, and the rainfall feed behind an axum HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Digital Twin Server
//!
//! HTTP service answering two kinds of urban what-if questions:
//!
//! - **Scenario impact**: how a proposed road, drain, green corridor, or
//!   traffic restriction changes commute time and flood exposure.
//! - **Flood alerts**: which known hotspots are likely to flood for a
//!   rainfall amount, either given directly or summed from the hourly
//!   forecast feed over day-long horizons.
//!
//! ## Architecture
//!
//! - **twin-core**: errors, constants, and domain models
//! - **twin-engine**: pure algorithms (geodesy, routing, spatial, scenario, alerts)
//! - **twin-providers**: rainfall feed clients
//! - this crate: configuration, dataset loading, services, and HTTP routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use digital_twin_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Digital twin server configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

pub use twin_core::{constants, models};

/// Environment configuration
pub mod config;

/// Startup dataset loaders
pub mod datasets;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware layers
pub mod middleware;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Business services above the engine
pub mod services;
