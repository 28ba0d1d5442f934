// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use digital_twin_server::config::{Environment, ServerConfig};
use digital_twin_server::logging::LoggingConfig;
use serial_test::serial;
use std::env;
use std::path::Path;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "ENVIRONMENT",
    "HOTSPOTS_PATH",
    "ROAD_NETWORK_PATH",
    "RAINFALL_API_BASE_URL",
    "RAINFALL_TIMEOUT_SECS",
    "RAINFALL_CONNECT_TIMEOUT_SECS",
    "RAINFALL_FORECAST_DAYS",
    "FORECAST_DEFAULT_LAT",
    "FORECAST_DEFAULT_LNG",
    "SCENARIO_OVERLAY_SPEED_KMH",
    "SCENARIO_BUFFER_METERS",
    "CORS_ALLOWED_ORIGINS",
    "RUST_LOG",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.http_port, 8000);
    assert_eq!(
        config.datasets.hotspots_path,
        Path::new("data/hyd_flood_points.geojson")
    );
    assert_eq!(config.rainfall.base_url, "https://api.open-meteo.com/v1/forecast");
    assert!((config.forecast.default_point.lat - 17.385).abs() < f64::EPSILON);
    assert!((config.scenario.overlay_speed_kmh - 60.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "9100");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("HOTSPOTS_PATH", "/srv/twin/points.geojson");
    env::set_var("RAINFALL_TIMEOUT_SECS", "4");
    env::set_var("SCENARIO_BUFFER_METERS", "250");
    env::set_var("FORECAST_DEFAULT_LAT", "19.076");
    env::set_var("FORECAST_DEFAULT_LNG", "72.8777");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9100);
    assert_eq!(config.environment, Environment::Production);
    assert!(config.environment.is_production());
    assert_eq!(
        config.datasets.hotspots_path,
        Path::new("/srv/twin/points.geojson")
    );
    assert_eq!(config.rainfall.timeout_secs, 4);
    assert_eq!(config.rainfall.feed_config().timeout_secs, 4);
    assert!((config.scenario.engine_config().hotspot_buffer_meters - 250.0).abs() < f64::EPSILON);
    assert!((config.forecast.default_point.lng - 72.8777).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_invalid_number_names_the_variable() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");
    let error = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert!(format!("{error:#}").contains("HTTP_PORT"));
}

#[test]
#[serial]
fn test_out_of_range_values_fail() {
    clear_env();
    env::set_var("RAINFALL_FORECAST_DAYS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("SCENARIO_OVERLAY_SPEED_KMH", "-10");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("FORECAST_DEFAULT_LAT", "100");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_rust_log_drives_only_the_logging_filter() {
    clear_env();
    env::set_var("RUST_LOG", "debug,tower_http=trace");

    let logging = LoggingConfig::from_env();
    let config = ServerConfig::from_env().unwrap();
    clear_env();

    // full directive string reaches the filter, not a collapsed level
    assert_eq!(logging.level, "debug,tower_http=trace");
    assert!(logging.env_filter().to_string().contains("debug"));
    assert_eq!(config, ServerConfig::default());
}
