// ABOUTME: Geographic value types shared by the router, spatial index, and API layer
// ABOUTME: Defines WGS84 GeoPoint with coordinate validation and inclusive BoundingBox
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, within [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, within [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated point
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if either coordinate is out of range or not finite
    pub fn new(lat: f64, lng: f64) -> AppResult<Self> {
        let point = Self { lat, lng };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(AppError::invalid_input(format!(
                "Invalid coordinates: lat={lat}, lng={lng}"
            )))
        }
    }

    /// Whether both coordinates are finite and inside the WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Axis-aligned box in degrees, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western edge
    pub min_lng: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lng: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a box from its four edges
    #[must_use]
    pub const fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    /// An inverted box contains nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.min_lng <= self.max_lng && self.min_lat <= self.max_lat)
    }

    /// Whether the point lies inside the box (edges included)
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lng..=self.max_lng).contains(&point.lng)
            && (self.min_lat..=self.max_lat).contains(&point.lat)
    }
}

impl FromStr for BoundingBox {
    type Err = AppError;

    /// Parse `"minLng,minLat,maxLng,maxLat"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::invalid_input(format!("Invalid bbox '{s}': {e}")))?;

        match parts.as_slice() {
            [min_lng, min_lat, max_lng, max_lat] => {
                Ok(Self::new(*min_lng, *min_lat, *max_lng, *max_lat))
            }
            _ => Err(AppError::invalid_input(format!(
                "Invalid bbox '{s}': expected minLng,minLat,maxLng,maxLat"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(17.385, 78.4867).is_ok());
        assert!(GeoPoint::new(90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_bbox_parsing() {
        let bbox: BoundingBox = "78.4,17.3,78.6,17.5".parse().unwrap();
        assert_eq!(bbox, BoundingBox::new(78.4, 17.3, 78.6, 17.5));

        assert!("78.4,17.3,78.6".parse::<BoundingBox>().is_err());
        assert!("a,b,c,d".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_bbox_contains_edges() {
        let bbox = BoundingBox::new(78.0, 17.0, 79.0, 18.0);
        assert!(bbox.contains(&GeoPoint { lat: 17.0, lng: 78.0 }));
        assert!(bbox.contains(&GeoPoint { lat: 18.0, lng: 79.0 }));
        assert!(!bbox.contains(&GeoPoint { lat: 18.01, lng: 78.5 }));

        let inverted = BoundingBox::new(79.0, 17.0, 78.0, 18.0);
        assert!(inverted.is_empty());
        assert!(!inverted.contains(&GeoPoint { lat: 17.5, lng: 78.5 }));
    }
}
