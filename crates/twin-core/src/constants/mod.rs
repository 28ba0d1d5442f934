// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for geodesy, scenario heuristics, alert tiers, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file. Heuristic coefficients live here so the engine and its tests
//! agree on one source of truth.

/// Earth model constants
pub mod geodesy {
    /// Mean Earth radius used for great-circle distances (km)
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    /// Sphere radius of the EPSG:3857 (Web Mercator) projection (m)
    pub const WEB_MERCATOR_RADIUS_M: f64 = 6_378_137.0;
    /// Latitude limit of the Web Mercator projection (degrees)
    pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_78;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Scenario impact calculator constants
pub mod scenario {
    /// Assumed speed of a newly injected overlay link (km/h)
    pub const DEFAULT_OVERLAY_SPEED_KMH: f64 = 60.0;
    /// Buffer around the intervention path used to count hotspots (m)
    pub const DEFAULT_HOTSPOT_BUFFER_METERS: f64 = 100.0;
    /// Citywide reference count of high-risk cells
    pub const BASELINE_RISK_CELLS: u32 = 1000;
    /// Citywide reference exposed population
    pub const BASELINE_POPULATION: u32 = 500_000;
    /// Cap on the heuristic travel-time saving (minutes)
    pub const MAX_HEURISTIC_TRAFFIC_MINUTES: f64 = 20.0;
    /// Heuristic minutes per lane-kilometre of intervention
    pub const HEURISTIC_MINUTES_PER_LANE_KM: f64 = 0.6;
    /// Floor of the rainfall-normalized factor
    pub const MIN_RAINFALL_FACTOR: f64 = 0.01;
    /// Rainfall (mm) that maps to a factor of 1.0
    pub const RAINFALL_NORMALIZATION_MM: f64 = 100.0;
    /// Risk cells per km for a new road (increases risk)
    pub const ROAD_CELLS_PER_KM: f64 = 10.0;
    /// Risk cells per km for a drain (decreases risk)
    pub const DRAIN_CELLS_PER_KM: f64 = 15.0;
    /// Risk cells per km for green infrastructure (decreases risk)
    pub const GREEN_CELLS_PER_KM: f64 = 8.0;
    /// Risk cells per km for a traffic restriction (decreases risk)
    pub const RESTRICTION_CELLS_PER_KM: f64 = 12.0;
}

/// Rainfall alert thresholds and tables
pub mod alerts {
    /// Upper bound (exclusive) of the low severity tier (mm)
    pub const LOW_MAX_MM: f64 = 10.0;
    /// Upper bound (exclusive) of the moderate severity tier (mm)
    pub const MODERATE_MAX_MM: f64 = 25.0;
    /// Upper bound (exclusive) of the high severity tier (mm)
    pub const HIGH_MAX_MM: f64 = 50.0;
    /// Upper bound (exclusive) of the 70% activation band (mm)
    pub const SEVERE_MAX_MM: f64 = 100.0;

    /// Activation fraction for rainfall below 10 mm
    pub const LOW_ACTIVATION: f64 = 0.05;
    /// Activation fraction for rainfall below 25 mm
    pub const MODERATE_ACTIVATION: f64 = 0.15;
    /// Activation fraction for rainfall below 50 mm
    pub const HIGH_ACTIVATION: f64 = 0.40;
    /// Activation fraction for rainfall below 100 mm
    pub const SEVERE_ACTIVATION: f64 = 0.70;
    /// Activation fraction for rainfall of 100 mm and more
    pub const FULL_ACTIVATION: f64 = 1.0;

    /// Message when the selected area has no known hotspots
    pub const NO_HOTSPOTS_MESSAGE: &str = "No known hotspots for selected area.";
    /// Action when the selected area has no known hotspots
    pub const NO_HOTSPOTS_ACTION: &str = "Monitor rainfall";
}

/// Forecast horizons in hours
pub mod horizons {
    /// Next-day horizon key and length
    pub const DAY1: (&str, u32) = ("day1", 24);
    /// Two-day horizon key and length
    pub const DAY2: (&str, u32) = ("day2", 48);
    /// Three-day horizon key and length
    pub const DAY3: (&str, u32) = ("day3", 72);
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    /// Default hotspot dataset path
    pub const DEFAULT_HOTSPOTS_PATH: &str = "data/hyd_flood_points.geojson";
    /// Default road network path
    pub const DEFAULT_ROAD_NETWORK_PATH: &str = "data/hyd_road_graph.json";
    /// Default rainfall forecast endpoint
    pub const DEFAULT_RAINFALL_API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
    /// Default rainfall request timeout (seconds)
    pub const DEFAULT_RAINFALL_TIMEOUT_SECS: u64 = 10;
    /// Default connect timeout for the rainfall feed (seconds)
    pub const DEFAULT_RAINFALL_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Default number of forecast days requested from the feed
    pub const DEFAULT_FORECAST_DAYS: u32 = 3;
    /// Default forecast latitude (Hyderabad city centre)
    pub const DEFAULT_FORECAST_LAT: f64 = 17.385;
    /// Default forecast longitude (Hyderabad city centre)
    pub const DEFAULT_FORECAST_LNG: f64 = 78.4867;
}

/// Service identity used in logs
pub mod service_names {
    /// Server binary / service name
    pub const DIGITAL_TWIN_SERVER: &str = "digital-twin-server";
}
