// ABOUTME: Flood forecast service combining the rainfall feed with the alert generator
// ABOUTME: Produces one alert per forecast horizon, keyed by horizon name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::horizons::{DAY1, DAY2, DAY3};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use twin_core::errors::AlertError;
use twin_core::models::{Alert, BoundingBox, GeoPoint, Hotspot};
use twin_engine::{forecast_rainfall, generate_alert};
use twin_providers::RainfallProvider;

/// Horizons reported by the forecast endpoint
pub const DEFAULT_HORIZONS: [(&str, u32); 3] = [DAY1, DAY2, DAY3];

/// Multi-horizon flood alerts from the rainfall feed
#[derive(Clone)]
pub struct FloodForecastService {
    provider: Arc<dyn RainfallProvider>,
    hotspots: Option<Arc<[Hotspot]>>,
}

impl FloodForecastService {
    /// Create a service over a feed and an optional hotspot dataset
    #[must_use]
    pub fn new(provider: Arc<dyn RainfallProvider>, hotspots: Option<Arc<[Hotspot]>>) -> Self {
        Self { provider, hotspots }
    }

    /// Name of the rainfall provider in use
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether the hotspot dataset is loaded
    #[must_use]
    pub const fn has_hotspots(&self) -> bool {
        self.hotspots.is_some()
    }

    /// Alert for a known rainfall amount, without calling the feed
    ///
    /// # Errors
    ///
    /// Invalid input for negative or non-finite rainfall, unavailable when
    /// no hotspot dataset is loaded
    pub fn alert_for_rainfall(
        &self,
        rainfall_mm: f64,
        bbox: Option<&BoundingBox>,
    ) -> AppResult<Alert> {
        if !rainfall_mm.is_finite() || rainfall_mm < 0.0 {
            return Err(AppError::invalid_input(format!(
                "rainfall must be a non-negative number, got {rainfall_mm}"
            )));
        }
        Ok(generate_alert(self.hotspots.as_deref(), rainfall_mm, bbox)?)
    }

    /// Alerts for each horizon at `point`
    ///
    /// # Errors
    ///
    /// Unavailable when no hotspot dataset is loaded (checked before any
    /// feed call), or the feed failure of any horizon
    pub async fn get_flood_forecast(
        &self,
        point: &GeoPoint,
        horizons: &[(&str, u32)],
        bbox: Option<&BoundingBox>,
    ) -> AppResult<BTreeMap<String, Alert>> {
        self.forecast_at(point, horizons, bbox, Utc::now()).await
    }

    /// Alerts for each horizon, counting rainfall from `now`
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_flood_forecast`]
    #[instrument(skip(self, horizons, bbox), fields(provider = self.provider.name()))]
    pub async fn forecast_at(
        &self,
        point: &GeoPoint,
        horizons: &[(&str, u32)],
        bbox: Option<&BoundingBox>,
        now: DateTime<Utc>,
    ) -> AppResult<BTreeMap<String, Alert>> {
        let hotspots = self
            .hotspots
            .as_deref()
            .ok_or(AlertError::DatasetUnavailable)?;

        let alerts = try_join_all(horizons.iter().map(|&(name, hours)| async move {
            let rainfall_mm = self.horizon_rainfall(point, hours, now).await?;
            debug!(horizon = name, hours, rainfall_mm, "Horizon rainfall");
            let alert = generate_alert(Some(hotspots), rainfall_mm, bbox)?;
            Ok::<_, AppError>((name.to_owned(), alert))
        }))
        .await?;

        Ok(alerts.into_iter().collect())
    }

    async fn horizon_rainfall(
        &self,
        point: &GeoPoint,
        hours: u32,
        now: DateTime<Utc>,
    ) -> AppResult<f64> {
        let started = Instant::now();
        let result = self.provider.hourly_rainfall(point).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_feed_call(
            self.provider.name(),
            result.as_ref().ok().map(Vec::len),
            elapsed_ms,
        );
        let samples = result?;
        Ok(forecast_rainfall(&samples, hours, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use twin_core::errors::ErrorCode;
    use twin_core::models::Severity;
    use twin_providers::{ForecastFetchError, StaticRainfallProvider};

    fn hotspots(count: usize) -> Arc<[Hotspot]> {
        (0..count)
            .map(|i| {
                Hotspot::new(GeoPoint {
                    lat: 17.3 + i as f64 * 0.001,
                    lng: 78.45,
                })
            })
            .collect()
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_forecast_sums_each_horizon() {
        // 1 mm per hour for three days
        let provider = StaticRainfallProvider::hourly(start(), &[1.0; 72]);
        let service = FloodForecastService::new(Arc::new(provider), Some(hotspots(20)));

        let alerts = service
            .forecast_at(
                &GeoPoint { lat: 17.385, lng: 78.4867 },
                &DEFAULT_HORIZONS,
                None,
                start(),
            )
            .await
            .unwrap();

        assert_eq!(
            alerts.keys().collect::<Vec<_>>(),
            vec!["day1", "day2", "day3"]
        );
        assert_eq!(alerts["day1"].severity, Severity::Moderate);
        assert!((alerts["day1"].rainfall_mm - 24.0).abs() < f64::EPSILON);
        assert_eq!(alerts["day2"].severity, Severity::High);
        assert_eq!(alerts["day3"].severity, Severity::Critical);
        assert_eq!(alerts["day3"].affected_count, 14);
    }

    #[tokio::test]
    async fn test_forecast_ignores_past_samples() {
        let provider = StaticRainfallProvider::hourly(start(), &[50.0, 50.0, 2.0]);
        let service = FloodForecastService::new(Arc::new(provider), Some(hotspots(5)));

        let alerts = service
            .forecast_at(
                &GeoPoint { lat: 17.0, lng: 78.0 },
                &[("next", 24)],
                None,
                start() + Duration::hours(2),
            )
            .await
            .unwrap();
        assert!((alerts["next"].rainfall_mm - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_checked_before_feed() {
        let provider = StaticRainfallProvider::failing(ForecastFetchError::Timeout { after_secs: 10 });
        let service = FloodForecastService::new(Arc::new(provider), None);

        let error = service
            .get_flood_forecast(&GeoPoint { lat: 17.0, lng: 78.0 }, &DEFAULT_HORIZONS, None)
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceUnavailable);
    }

    #[tokio::test]
    async fn test_feed_failure_surfaces() {
        let provider = StaticRainfallProvider::failing(ForecastFetchError::HttpStatus {
            status: 503,
            body: "maintenance".into(),
        });
        let service = FloodForecastService::new(Arc::new(provider), Some(hotspots(3)));

        let error = service
            .get_flood_forecast(&GeoPoint { lat: 17.0, lng: 78.0 }, &DEFAULT_HORIZONS, None)
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_alert_for_rainfall_validates() {
        let service = FloodForecastService::new(
            Arc::new(StaticRainfallProvider::new(Vec::new())),
            Some(hotspots(20)),
        );
        assert!(service.alert_for_rainfall(-1.0, None).is_err());
        let alert = service.alert_for_rainfall(30.0, None).unwrap();
        assert_eq!(alert.affected_count, 8);
        assert_eq!(alert.severity, Severity::High);
    }
}
