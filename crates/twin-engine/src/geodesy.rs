// ABOUTME: Great-circle distance, polyline length, and Web Mercator projection helpers
// ABOUTME: Deterministic and infallible; used by the scenario engine and spatial index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::geodesy::{EARTH_RADIUS_KM, WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_RADIUS_M};
use crate::models::GeoPoint;
use geo::Coord;
use std::f64::consts::FRAC_PI_4;

/// Great-circle distance between two points (km)
#[must_use]
pub fn haversine_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of consecutive great-circle distances (km); 0 for fewer than two points
#[must_use]
pub fn polyline_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance_km(&pair[0], &pair[1]))
        .sum()
}

/// Project a point to EPSG:3857 metres
#[must_use]
pub fn to_web_mercator(point: &GeoPoint) -> Coord<f64> {
    let lat = point.lat.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
    Coord {
        x: WEB_MERCATOR_RADIUS_M * point.lng.to_radians(),
        y: WEB_MERCATOR_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
    }
}
