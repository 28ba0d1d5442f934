// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, dataset paths, rainfall feed, scenario tunables, and CORS from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::defaults;
use crate::constants::scenario::{DEFAULT_HOTSPOT_BUFFER_METERS, DEFAULT_OVERLAY_SPEED_KMH};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;
use twin_core::models::GeoPoint;
use twin_engine::ScenarioConfig;
use twin_providers::RainfallFeedConfig;

/// Upper bound Open-Meteo accepts for `forecast_days`
const MAX_FORECAST_DAYS: u32 = 16;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        })
    }
}

/// Dataset files loaded at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Hotspot `GeoJSON` point collection
    pub hotspots_path: PathBuf,
    /// Road network JSON
    pub road_network_path: PathBuf,
}

/// Rainfall forecast feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainfallConfig {
    /// Forecast endpoint
    pub base_url: String,
    /// Request timeout
    pub timeout_secs: u64,
    /// Connect timeout
    pub connect_timeout_secs: u64,
    /// Days of hourly data requested
    pub forecast_days: u32,
}

impl RainfallConfig {
    /// Provider settings
    #[must_use]
    pub fn feed_config(&self) -> RainfallFeedConfig {
        RainfallFeedConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            connect_timeout_secs: self.connect_timeout_secs,
            forecast_days: self.forecast_days,
        }
    }
}

/// Flood forecast defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Point used when a request names none
    pub default_point: GeoPoint,
}

/// Scenario calculator tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSettings {
    /// Overlay edge speed for new roads (km/h)
    pub overlay_speed_kmh: f64,
    /// Hotspot buffer around intervention paths (m)
    pub buffer_meters: f64,
}

impl ScenarioSettings {
    /// Engine settings
    #[must_use]
    pub const fn engine_config(&self) -> ScenarioConfig {
        ScenarioConfig {
            overlay_speed_kmh: self.overlay_speed_kmh,
            hotspot_buffer_meters: self.buffer_meters,
        }
    }
}

/// Cross-origin policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Dataset files
    pub datasets: DatasetConfig,
    /// Rainfall feed
    pub rainfall: RainfallConfig,
    /// Forecast defaults
    pub forecast: ForecastConfig,
    /// Scenario tunables
    pub scenario: ScenarioSettings,
    /// CORS policy
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::DEFAULT_HTTP_PORT,
            host: defaults::DEFAULT_HOST.to_owned(),
            environment: Environment::default(),
            datasets: DatasetConfig {
                hotspots_path: PathBuf::from(defaults::DEFAULT_HOTSPOTS_PATH),
                road_network_path: PathBuf::from(defaults::DEFAULT_ROAD_NETWORK_PATH),
            },
            rainfall: RainfallConfig {
                base_url: defaults::DEFAULT_RAINFALL_API_BASE_URL.to_owned(),
                timeout_secs: defaults::DEFAULT_RAINFALL_TIMEOUT_SECS,
                connect_timeout_secs: defaults::DEFAULT_RAINFALL_CONNECT_TIMEOUT_SECS,
                forecast_days: defaults::DEFAULT_FORECAST_DAYS,
            },
            forecast: ForecastConfig {
                default_point: GeoPoint {
                    lat: defaults::DEFAULT_FORECAST_LAT,
                    lng: defaults::DEFAULT_FORECAST_LNG,
                },
            },
            scenario: ScenarioSettings {
                overlay_speed_kmh: DEFAULT_OVERLAY_SPEED_KMH,
                buffer_meters: DEFAULT_HOTSPOT_BUFFER_METERS,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a value does not parse or is out of range
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let default_point = GeoPoint {
            lat: env_var_or(
                "FORECAST_DEFAULT_LAT",
                &defaults::DEFAULT_FORECAST_LAT.to_string(),
            )
            .parse()
            .context("Invalid FORECAST_DEFAULT_LAT value")?,
            lng: env_var_or(
                "FORECAST_DEFAULT_LNG",
                &defaults::DEFAULT_FORECAST_LNG.to_string(),
            )
            .parse()
            .context("Invalid FORECAST_DEFAULT_LNG value")?,
        };

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &defaults::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", defaults::DEFAULT_HOST),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            datasets: DatasetConfig {
                hotspots_path: PathBuf::from(env_var_or(
                    "HOTSPOTS_PATH",
                    defaults::DEFAULT_HOTSPOTS_PATH,
                )),
                road_network_path: PathBuf::from(env_var_or(
                    "ROAD_NETWORK_PATH",
                    defaults::DEFAULT_ROAD_NETWORK_PATH,
                )),
            },
            rainfall: RainfallConfig {
                base_url: env_var_or(
                    "RAINFALL_API_BASE_URL",
                    defaults::DEFAULT_RAINFALL_API_BASE_URL,
                ),
                timeout_secs: env_var_or(
                    "RAINFALL_TIMEOUT_SECS",
                    &defaults::DEFAULT_RAINFALL_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid RAINFALL_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or(
                    "RAINFALL_CONNECT_TIMEOUT_SECS",
                    &defaults::DEFAULT_RAINFALL_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid RAINFALL_CONNECT_TIMEOUT_SECS value")?,
                forecast_days: env_var_or(
                    "RAINFALL_FORECAST_DAYS",
                    &defaults::DEFAULT_FORECAST_DAYS.to_string(),
                )
                .parse()
                .context("Invalid RAINFALL_FORECAST_DAYS value")?,
            },
            forecast: ForecastConfig { default_point },
            scenario: ScenarioSettings {
                overlay_speed_kmh: env_var_or(
                    "SCENARIO_OVERLAY_SPEED_KMH",
                    &DEFAULT_OVERLAY_SPEED_KMH.to_string(),
                )
                .parse()
                .context("Invalid SCENARIO_OVERLAY_SPEED_KMH value")?,
                buffer_meters: env_var_or(
                    "SCENARIO_BUFFER_METERS",
                    &DEFAULT_HOTSPOT_BUFFER_METERS.to_string(),
                )
                .parse()
                .context("Invalid SCENARIO_BUFFER_METERS value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that parsing alone cannot
    ///
    /// # Errors
    ///
    /// Returns an error describing the first out-of-range value
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.forecast.default_point.is_valid(),
            "FORECAST_DEFAULT_LAT/LNG must be valid WGS84 coordinates, got {}",
            self.forecast.default_point
        );
        ensure!(
            self.rainfall.timeout_secs > 0,
            "RAINFALL_TIMEOUT_SECS must be at least 1"
        );
        ensure!(
            (1..=MAX_FORECAST_DAYS).contains(&self.rainfall.forecast_days),
            "RAINFALL_FORECAST_DAYS must be between 1 and {MAX_FORECAST_DAYS}"
        );
        ensure!(
            self.scenario.overlay_speed_kmh.is_finite() && self.scenario.overlay_speed_kmh > 0.0,
            "SCENARIO_OVERLAY_SPEED_KMH must be positive"
        );
        ensure!(
            self.scenario.buffer_meters.is_finite() && self.scenario.buffer_meters >= 0.0,
            "SCENARIO_BUFFER_METERS must be non-negative"
        );
        Ok(())
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Digital Twin Server Configuration:\n\
             - Bind: {}\n\
             - Environment: {}\n\
             - Hotspots: {}\n\
             - Road Network: {}\n\
             - Rainfall Feed: {} (timeout {}s, {} days)\n\
             - Forecast Default Point: {}\n\
             - Scenario: overlay {} km/h, buffer {} m\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            self.datasets.hotspots_path.display(),
            self.datasets.road_network_path.display(),
            self.rainfall.base_url,
            self.rainfall.timeout_secs,
            self.rainfall.forecast_days,
            self.forecast.default_point,
            self.scenario.overlay_speed_kmh,
            self.scenario.buffer_meters,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
#[must_use]
pub fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
