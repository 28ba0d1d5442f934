// ABOUTME: Hourly rainfall forecast providers behind a common async trait
// ABOUTME: Open-Meteo HTTP feed for production, static samples for offline runs and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rainfall Forecast Providers
//!
//! A [`RainfallProvider`] answers one question: the hourly rainfall series
//! for a point. Summation over horizons happens in the engine, so providers
//! stay free of business rules.

use crate::errors::ForecastFetchError;
use crate::http_client::create_client_with_timeout;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use twin_core::constants::defaults::{
    DEFAULT_FORECAST_DAYS, DEFAULT_RAINFALL_API_BASE_URL, DEFAULT_RAINFALL_CONNECT_TIMEOUT_SECS,
    DEFAULT_RAINFALL_TIMEOUT_SECS,
};
use twin_core::models::{GeoPoint, RainfallSample};
use twin_engine::forecast::samples_from_feed;

/// Maximum number of body characters kept in an HTTP status error
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Source of hourly rainfall series
#[async_trait]
pub trait RainfallProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Hourly rainfall samples for a point, oldest first
    async fn hourly_rainfall(
        &self,
        point: &GeoPoint,
    ) -> Result<Vec<RainfallSample>, ForecastFetchError>;
}

/// Settings of the HTTP rainfall feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainfallFeedConfig {
    /// Forecast endpoint
    pub base_url: String,
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// Connect timeout
    pub connect_timeout_secs: u64,
    /// Days of hourly data to request
    pub forecast_days: u32,
}

impl Default for RainfallFeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAINFALL_API_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_RAINFALL_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_RAINFALL_CONNECT_TIMEOUT_SECS,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

#[derive(Serialize)]
struct FeedQuery<'a> {
    latitude: f64,
    longitude: f64,
    hourly: &'a str,
    forecast_days: u32,
    timezone: &'a str,
}

/// Hourly rain series read from an Open-Meteo body
///
/// Anything other than two arrays under `hourly.time` and `hourly.rain`
/// reads as an empty series. Entries that are not strings or numbers become
/// unparsable timestamps or missing values.
#[derive(Debug, Default)]
struct HourlySeries {
    time: Vec<String>,
    rain: Vec<Option<f64>>,
}

impl HourlySeries {
    fn from_body(body: &Value) -> Self {
        let hourly = body.get("hourly");
        let time = hourly.and_then(|h| h.get("time")).and_then(Value::as_array);
        let rain = hourly.and_then(|h| h.get("rain")).and_then(Value::as_array);
        let (Some(time), Some(rain)) = (time, rain) else {
            if hourly.is_some() {
                warn!("Rainfall feed hourly series is malformed, treating it as empty");
            }
            return Self::default();
        };
        Self {
            time: time
                .iter()
                .map(|t| t.as_str().unwrap_or_default().to_owned())
                .collect(),
            rain: rain.iter().map(Value::as_f64).collect(),
        }
    }
}

/// Open-Meteo hourly rain feed
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Client,
    config: RainfallFeedConfig,
}

impl OpenMeteoProvider {
    /// Create a provider with its own pooled client
    #[must_use]
    pub fn new(config: RainfallFeedConfig) -> Self {
        let client = create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs);
        Self { client, config }
    }

    /// Feed settings
    #[must_use]
    pub const fn config(&self) -> &RainfallFeedConfig {
        &self.config
    }

    /// Decode a feed body into samples
    ///
    /// # Errors
    ///
    /// `Decode` only when the body is not JSON; a malformed series decodes
    /// to no samples
    pub fn decode(body: &[u8]) -> Result<Vec<RainfallSample>, ForecastFetchError> {
        let body: Value =
            serde_json::from_slice(body).map_err(|e| ForecastFetchError::Decode(e.to_string()))?;
        let hourly = HourlySeries::from_body(&body);
        Ok(samples_from_feed(&hourly.time, &hourly.rain))
    }
}

#[async_trait]
impl RainfallProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn hourly_rainfall(
        &self,
        point: &GeoPoint,
    ) -> Result<Vec<RainfallSample>, ForecastFetchError> {
        let timeout_secs = self.config.timeout_secs;
        let query = FeedQuery {
            latitude: point.lat,
            longitude: point.lng,
            hourly: "rain",
            forecast_days: self.config.forecast_days,
            timezone: "UTC",
        };

        debug!(url = %self.config.base_url, %point, "Fetching rainfall forecast");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ForecastFetchError::from_reqwest(&e, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            warn!(status = status.as_u16(), "Rainfall feed returned an error status");
            return Err(ForecastFetchError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastFetchError::from_reqwest(&e, timeout_secs))?;
        let samples = Self::decode(&body)?;
        debug!(samples = samples.len(), "Rainfall forecast decoded");
        Ok(samples)
    }
}

/// Fixed answer provider
#[derive(Debug, Clone)]
pub struct StaticRainfallProvider {
    answer: Result<Vec<RainfallSample>, ForecastFetchError>,
}

impl StaticRainfallProvider {
    /// Always return these samples
    #[must_use]
    pub const fn new(samples: Vec<RainfallSample>) -> Self {
        Self {
            answer: Ok(samples),
        }
    }

    /// Hourly samples starting at `start`, one per value
    #[must_use]
    pub fn hourly(start: DateTime<Utc>, values: &[f64]) -> Self {
        let samples = values
            .iter()
            .zip(0_i64..)
            .map(|(mm, hour)| RainfallSample {
                timestamp: start + Duration::hours(hour),
                rainfall_mm: *mm,
            })
            .collect();
        Self::new(samples)
    }

    /// Always fail with this error
    #[must_use]
    pub const fn failing(error: ForecastFetchError) -> Self {
        Self { answer: Err(error) }
    }
}

#[async_trait]
impl RainfallProvider for StaticRainfallProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn hourly_rainfall(
        &self,
        _point: &GeoPoint,
    ) -> Result<Vec<RainfallSample>, ForecastFetchError> {
        self.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_open_meteo_body() {
        let body = serde_json::json!({
            "latitude": 17.375,
            "longitude": 78.5,
            "hourly_units": {"time": "iso8601", "rain": "mm"},
            "hourly": {
                "time": ["2025-07-01T00:00", "2025-07-01T01:00", "2025-07-01T02:00"],
                "rain": [0.4, null, 2.1]
            }
        });
        let samples = OpenMeteoProvider::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples[1].rainfall_mm.abs() < f64::EPSILON);
        assert!((samples[2].rainfall_mm - 2.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_missing_series_is_empty() {
        let samples = OpenMeteoProvider::decode(br#"{"latitude": 1.0}"#).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_decode_malformed_series_is_empty() {
        for body in [
            serde_json::json!({"hourly": {"time": "2025-07-01T00:00", "rain": [1.0]}}),
            serde_json::json!({"hourly": {"time": ["2025-07-01T00:00"], "rain": {"mm": 1.0}}}),
            serde_json::json!({"hourly": "unavailable"}),
            serde_json::json!([1, 2, 3]),
        ] {
            let samples = OpenMeteoProvider::decode(body.to_string().as_bytes()).unwrap();
            assert!(samples.is_empty(), "{body}");
        }
    }

    #[test]
    fn test_decode_non_numeric_rain_counts_as_zero() {
        let body = serde_json::json!({
            "hourly": {
                "time": ["2025-07-01T00:00", 42, "2025-07-01T02:00"],
                "rain": ["heavy", 3.0, 1.5]
            }
        });
        let samples = OpenMeteoProvider::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].rainfall_mm.abs() < f64::EPSILON);
        assert!((samples[1].rainfall_mm - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            OpenMeteoProvider::decode(b"<html>busy</html>"),
            Err(ForecastFetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_static_provider_answers() {
        let start = Utc::now();
        let provider = StaticRainfallProvider::hourly(start, &[1.0, 2.0]);
        let samples = provider
            .hourly_rainfall(&GeoPoint { lat: 0.0, lng: 0.0 })
            .await
            .unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].timestamp, start + Duration::hours(1));

        let failing = StaticRainfallProvider::failing(ForecastFetchError::Transport("down".into()));
        assert!(failing
            .hourly_rainfall(&GeoPoint { lat: 0.0, lng: 0.0 })
            .await
            .is_err());
    }
}
