// ABOUTME: Service layer between HTTP handlers and the engine
// ABOUTME: Hosts the flood forecast orchestration that combines the feed with the alert generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Business services.
//!
//! Handlers stay thin and delegate here; anything that performs I/O on
//! behalf of the engine lives in this module.

/// Multi-horizon flood forecast
pub mod forecast;

pub use forecast::{FloodForecastService, DEFAULT_HORIZONS};
