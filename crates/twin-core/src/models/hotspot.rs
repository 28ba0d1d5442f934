// ABOUTME: Flood hotspot record: a known historical flood-prone point with free-form metadata
// ABOUTME: Serialized flat as {lat, lng, properties} for alert payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geolocated flood hotspot
///
/// Hotspots are never mutated by the engine; collections of them are only
/// filtered and sliced, and their order is significant for alert selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Point location
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Attribute mapping carried over from the source dataset
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Hotspot {
    /// Create a hotspot without attributes
    #[must_use]
    pub fn new(location: GeoPoint) -> Self {
        Self {
            location,
            properties: Map::new(),
        }
    }

    /// Attach one attribute
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
