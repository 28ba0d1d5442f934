// ABOUTME: Spatial queries over the flood hotspot dataset
// ABOUTME: Path buffers in Web Mercator metres and inclusive bounding-box filters, order preserving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::SpatialError;
use crate::geodesy::to_web_mercator;
use crate::models::{BoundingBox, GeoPoint, Hotspot};
use geo::{EuclideanDistance, LineString, Point};
use rayon::prelude::*;

/// Hotspots whose projected distance to the path is at most `buffer_meters`
///
/// Equivalent to intersecting with a round-capped buffer polygon built in
/// EPSG:3857. Result keeps dataset order.
///
/// # Errors
///
/// `EmptyGeometry` when the path has fewer than two points
pub fn hotspots_within_buffer(
    hotspots: &[Hotspot],
    polyline: &[GeoPoint],
    buffer_meters: f64,
) -> Result<Vec<Hotspot>, SpatialError> {
    if polyline.len() < 2 {
        return Err(SpatialError::EmptyGeometry {
            points: polyline.len(),
        });
    }
    if buffer_meters.is_nan() || buffer_meters < 0.0 {
        return Ok(Vec::new());
    }

    let line: LineString<f64> = polyline.iter().map(to_web_mercator).collect();

    Ok(hotspots
        .par_iter()
        .filter(|hotspot| {
            let point = Point::from(to_web_mercator(&hotspot.location));
            point.euclidean_distance(&line) <= buffer_meters
        })
        .cloned()
        .collect())
}

/// Hotspots inside an inclusive bounding box, in dataset order
#[must_use]
pub fn hotspots_in_bounding_box(hotspots: &[Hotspot], bbox: &BoundingBox) -> Vec<Hotspot> {
    if bbox.is_empty() {
        return Vec::new();
    }
    hotspots
        .par_iter()
        .filter(|hotspot| bbox.contains(&hotspot.location))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::geodesy::WEB_MERCATOR_RADIUS_M;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    fn hotspot(lat: f64, lng: f64, name: &str) -> Hotspot {
        Hotspot::new(point(lat, lng)).with_property("name", serde_json::json!(name))
    }

    /// Degrees of latitude at the equator that project to `meters`
    fn lat_offset(meters: f64) -> f64 {
        (meters / WEB_MERCATOR_RADIUS_M).to_degrees()
    }

    #[test]
    fn test_buffer_contains_path_vertices() {
        let path = [point(17.38, 78.48), point(17.39, 78.49)];
        let hotspots = vec![hotspot(17.38, 78.48, "on-path"), hotspot(17.50, 78.60, "far")];

        for buffer in [0.0, 1.0, 100.0] {
            let found = hotspots_within_buffer(&hotspots, &path, buffer).unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].properties["name"], "on-path");
        }
    }

    #[test]
    fn test_buffer_excludes_perpendicular_outlier() {
        // east-west path on the equator; projected y is exact there
        let path = [point(0.0, 10.0), point(0.0, 10.1)];
        let near = hotspot(lat_offset(50.0), 10.05, "near");
        let far = hotspot(lat_offset(1000.0), 10.05, "far");

        let found = hotspots_within_buffer(&[near, far], &path, 100.0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].properties["name"], "near");
    }

    #[test]
    fn test_buffer_preserves_order_and_rejects_short_paths() {
        let path = [point(0.0, 0.0), point(0.0, 1.0)];
        let hotspots: Vec<Hotspot> = (0..50)
            .map(|i| hotspot(0.0, f64::from(i) * 0.02, &i.to_string()))
            .collect();

        let found = hotspots_within_buffer(&hotspots, &path, 10.0).unwrap();
        let names: Vec<_> = found.iter().map(|h| h.properties["name"].clone()).collect();
        let expected: Vec<_> = (0..50).map(|i| serde_json::json!(i.to_string())).collect();
        assert_eq!(names, expected);

        assert_eq!(
            hotspots_within_buffer(&hotspots, &path[..1], 10.0).unwrap_err(),
            SpatialError::EmptyGeometry { points: 1 }
        );
        assert!(hotspots_within_buffer(&hotspots, &path, -5.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bounding_box_is_inclusive() {
        let hotspots = vec![
            hotspot(17.0, 78.0, "corner"),
            hotspot(17.5, 78.5, "inside"),
            hotspot(18.5, 78.5, "outside"),
        ];
        let bbox = BoundingBox::new(78.0, 17.0, 79.0, 18.0);
        let found = hotspots_in_bounding_box(&hotspots, &bbox);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].properties["name"], "corner");

        let inverted = BoundingBox::new(79.0, 18.0, 78.0, 17.0);
        assert!(hotspots_in_bounding_box(&hotspots, &inverted).is_empty());
    }
}
