// ABOUTME: Dataset fixtures shared by integration tests
// ABOUTME: Small hotspot sets, a three-node road network, and prebuilt server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use digital_twin_server::config::ServerConfig;
use digital_twin_server::datasets::Datasets;
use digital_twin_server::models::{GeoPoint, Hotspot};
use digital_twin_server::resources::ServerResources;
use serde_json::{json, Value};
use std::sync::Arc;
use twin_engine::network::{EdgeRecord, NodeRecord};
use twin_engine::{NetworkRecords, WeightedNetwork};
use twin_providers::RainfallProvider;

/// `count` hotspots stepping north from (17.30, 78.45)
pub fn hotspots(count: usize) -> Arc<[Hotspot]> {
    (0..count)
        .map(|i| {
            Hotspot::new(GeoPoint {
                lat: 17.3 + i as f64 * 0.001,
                lng: 78.45,
            })
            .with_property("id", i)
        })
        .collect()
}

/// Road network records: 1 -> 2 -> 3 and back, 600 s per hop
pub fn network_records() -> NetworkRecords {
    let node = |id, lat, lng| NodeRecord { id, lat, lng };
    let edge = |u, v| EdgeRecord {
        u,
        v,
        travel_time: 600.0,
        speed_kph: Some(30.0),
    };
    NetworkRecords {
        nodes: vec![
            node(1, 17.40, 78.40),
            node(2, 17.40, 78.50),
            node(3, 17.50, 78.50),
        ],
        edges: vec![edge(1, 2), edge(2, 1), edge(2, 3), edge(3, 2)],
    }
}

/// Same network as JSON, as it would appear on disk
pub fn network_json() -> Value {
    json!({
        "nodes": [
            {"id": 1, "lat": 17.40, "lng": 78.40},
            {"id": 2, "lat": 17.40, "lng": 78.50},
            {"id": 3, "lat": 17.50, "lng": 78.50}
        ],
        "edges": [
            {"u": 1, "v": 2, "travel_time": 600.0, "speed_kph": 30.0},
            {"u": 2, "v": 1, "travel_time": 600.0, "speed_kph": 30.0},
            {"u": 2, "v": 3, "travel_time": 600.0},
            {"u": 3, "v": 2, "travel_time": 600.0}
        ]
    })
}

/// Loaded fixture network
pub fn network() -> Arc<WeightedNetwork> {
    Arc::new(WeightedNetwork::from_records(network_records()).unwrap())
}

/// Resources over the given datasets and feed
pub fn resources(datasets: Datasets, provider: Arc<dyn RainfallProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        Arc::new(ServerConfig::default()),
        datasets,
        provider,
    ))
}
