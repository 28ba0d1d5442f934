// ABOUTME: Startup loaders for the flood hotspot GeoJSON and the road network JSON
// ABOUTME: Missing or malformed datasets are logged and leave dependent features degraded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dataset Loading
//!
//! Both datasets are read once at startup and shared read-only afterwards.
//! A failed load is never fatal: the scenario engine falls back to its
//! heuristics and the flood endpoints answer "unavailable".

use crate::config::DatasetConfig;
use crate::logging::AppLogger;
use geojson::{GeoJson, Value as GeometryValue};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use twin_core::models::{GeoPoint, Hotspot};
use twin_engine::network::NetworkBuildError;
use twin_engine::{NetworkRecords, WeightedNetwork};

/// Dataset loading failures
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// File is not valid `GeoJSON`
    #[error("Invalid GeoJSON in {}: {source}", path.display())]
    GeoJson {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<geojson::Error>,
    },

    /// `GeoJSON` root is not a feature collection
    #[error("{} must contain a GeoJSON FeatureCollection", path.display())]
    NotFeatureCollection {
        /// Dataset path
        path: PathBuf,
    },

    /// Road network file is not valid JSON of the expected shape
    #[error("Invalid road network JSON in {}: {source}", path.display())]
    Json {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Road network records are inconsistent
    #[error("Invalid road network in {}: {source}", path.display())]
    Network {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: NetworkBuildError,
    },
}

/// Datasets shared by the engine and the forecast service
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    /// Flood hotspots, in file order
    pub hotspots: Option<Arc<[Hotspot]>>,
    /// Road network
    pub network: Option<Arc<WeightedNetwork>>,
}

impl Datasets {
    /// Load both datasets, keeping whichever succeed
    #[must_use]
    pub fn load(config: &DatasetConfig) -> Self {
        Self {
            hotspots: load_optional("hotspots", &config.hotspots_path, load_hotspots, Vec::len)
                .map(Arc::from),
            network: load_optional(
                "road_network",
                &config.road_network_path,
                load_road_network,
                WeightedNetwork::node_count,
            )
            .map(Arc::new),
        }
    }

    /// Number of loaded hotspots
    #[must_use]
    pub fn hotspot_count(&self) -> Option<usize> {
        self.hotspots.as_ref().map(|h| h.len())
    }
}

fn load_optional<D>(
    name: &str,
    path: &Path,
    loader: impl FnOnce(&Path) -> Result<D, DatasetError>,
    count: impl FnOnce(&D) -> usize,
) -> Option<D> {
    match loader(path) {
        Ok(data) => {
            AppLogger::log_dataset_load(name, path, Some(count(&data)));
            Some(data)
        }
        Err(e) => {
            warn!(dataset = name, error = %e, "Dataset load failed");
            AppLogger::log_dataset_load(name, path, None);
            None
        }
    }
}

/// Load flood hotspots from a `GeoJSON` `FeatureCollection` of points
///
/// Features without a valid point geometry are skipped with a warning.
/// Property values that are arrays or objects are flattened to strings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a feature collection
pub fn load_hotspots(path: &Path) -> Result<Vec<Hotspot>, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_hotspots(&text, path)
}

fn parse_hotspots(text: &str, path: &Path) -> Result<Vec<Hotspot>, DatasetError> {
    let geojson: GeoJson = text.parse().map_err(|source| DatasetError::GeoJson {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DatasetError::NotFeatureCollection {
            path: path.to_path_buf(),
        });
    };

    let mut hotspots = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let location = feature.geometry.as_ref().and_then(|g| point_location(&g.value));
        let Some(location) = location else {
            warn!(
                feature = index,
                path = %path.display(),
                "Skipping hotspot without a valid point geometry"
            );
            continue;
        };
        hotspots.push(Hotspot {
            location,
            properties: feature
                .properties
                .map(scalar_properties)
                .unwrap_or_default(),
        });
    }
    Ok(hotspots)
}

fn point_location(value: &GeometryValue) -> Option<GeoPoint> {
    match value {
        GeometryValue::Point(position) => match position.as_slice() {
            [lng, lat, ..] => Some(GeoPoint {
                lat: *lat,
                lng: *lng,
            })
            .filter(GeoPoint::is_valid),
            _ => None,
        },
        _ => None,
    }
}

fn scalar_properties(properties: Map<String, Value>) -> Map<String, Value> {
    properties
        .into_iter()
        .map(|(key, value)| match value {
            Value::Array(_) | Value::Object(_) => (key, Value::String(value.to_string())),
            scalar => (key, scalar),
        })
        .collect()
}

/// Load the road network from `{nodes: [...], edges: [...]}` JSON
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or names
/// unknown nodes
pub fn load_road_network(path: &Path) -> Result<WeightedNetwork, DatasetError> {
    let text = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: NetworkRecords =
        serde_json::from_slice(&text).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    WeightedNetwork::from_records(records).map_err(|source| DatasetError::Network {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hotspots_skips_non_points() {
        let text = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [78.47, 17.39]},
                 "properties": {"name": "Malakpet", "depth_cm": 40, "tags": ["underpass", "drain"]}},
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[78.0, 17.0], [78.1, 17.1]]},
                 "properties": {}},
                {"type": "Feature", "geometry": null, "properties": {}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200.0, 17.0]}, "properties": null}
            ]
        })
        .to_string();

        let hotspots = parse_hotspots(&text, Path::new("inline.geojson")).unwrap();
        assert_eq!(hotspots.len(), 1);
        assert!((hotspots[0].location.lat - 17.39).abs() < f64::EPSILON);
        assert_eq!(hotspots[0].properties["name"], "Malakpet");
        assert_eq!(hotspots[0].properties["depth_cm"], 40);
        assert_eq!(hotspots[0].properties["tags"], r#"["underpass","drain"]"#);
    }

    #[test]
    fn test_parse_hotspots_rejects_single_feature() {
        let text = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [78.4, 17.3]}, "properties": {}}"#;
        assert!(matches!(
            parse_hotspots(text, Path::new("single.geojson")),
            Err(DatasetError::NotFeatureCollection { .. })
        ));
        assert!(matches!(
            parse_hotspots("not json", Path::new("broken.geojson")),
            Err(DatasetError::GeoJson { .. })
        ));
    }

    #[test]
    fn test_missing_files_degrade_to_none() {
        let datasets = Datasets::load(&DatasetConfig {
            hotspots_path: PathBuf::from("/nonexistent/hotspots.geojson"),
            road_network_path: PathBuf::from("/nonexistent/network.json"),
        });
        assert!(datasets.hotspots.is_none());
        assert!(datasets.network.is_none());
        assert_eq!(datasets.hotspot_count(), None);
    }
}
