// ABOUTME: Centralized resource container shared by every HTTP handler
// ABOUTME: Owns configuration, loaded datasets, the scenario engine, and the forecast service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Everything is created once at startup and shared read-only through
//! `Arc<ServerResources>`. Requests never mutate the datasets.

use crate::config::ServerConfig;
use crate::datasets::Datasets;
use crate::services::FloodForecastService;
use std::sync::Arc;
use twin_engine::ScenarioEngine;
use twin_providers::{OpenMeteoProvider, RainfallProvider};

/// Shared state for the HTTP layer
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Loaded datasets
    pub datasets: Datasets,
    /// What-if calculator
    pub engine: ScenarioEngine,
    /// Flood forecast orchestration
    pub forecast: FloodForecastService,
}

impl ServerResources {
    /// Assemble resources from already loaded datasets and a rainfall feed
    #[must_use]
    pub fn new(
        config: Arc<ServerConfig>,
        datasets: Datasets,
        provider: Arc<dyn RainfallProvider>,
    ) -> Self {
        let engine = ScenarioEngine::new(
            datasets.network.clone(),
            datasets.hotspots.clone(),
            config.scenario.engine_config(),
        );
        let forecast = FloodForecastService::new(provider, datasets.hotspots.clone());
        Self {
            config,
            datasets,
            engine,
            forecast,
        }
    }

    /// Load datasets from the configured paths and use the live feed
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        let datasets = Datasets::load(&config.datasets);
        let provider = Arc::new(OpenMeteoProvider::new(config.rainfall.feed_config()));
        Self::new(Arc::new(config), datasets, provider)
    }
}
