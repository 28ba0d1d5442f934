// ABOUTME: Hourly rainfall feed decoding and forward-looking horizon summation
// ABOUTME: Timestamps without an offset are UTC; unparsable entries are dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::RainfallSample;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse an ISO-8601 feed timestamp
#[must_use]
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Pair feed timestamps with their hourly values
///
/// Missing, negative, or non-finite values become 0 mm. Extra entries on
/// either side are ignored.
#[must_use]
pub fn samples_from_feed(times: &[String], values: &[Option<f64>]) -> Vec<RainfallSample> {
    times
        .iter()
        .zip(values)
        .filter_map(|(raw, value)| {
            let Some(timestamp) = parse_feed_timestamp(raw) else {
                trace!(timestamp = %raw, "Skipping unparsable feed timestamp");
                return None;
            };
            let rainfall_mm = value
                .filter(|mm| mm.is_finite() && *mm >= 0.0)
                .unwrap_or(0.0);
            Some(RainfallSample {
                timestamp,
                rainfall_mm,
            })
        })
        .collect()
}

/// Total rainfall over the next `horizon_hours` samples at or after `now` (mm)
#[must_use]
pub fn forecast_rainfall(samples: &[RainfallSample], horizon_hours: u32, now: DateTime<Utc>) -> f64 {
    samples
        .iter()
        .filter(|sample| sample.timestamp >= now)
        .take(horizon_hours as usize)
        .map(|sample| sample.rainfall_mm)
        .sum()
}
