// ABOUTME: Read-only weighted road network stored as a compressed sparse row graph
// ABOUTME: Nodes carry opaque ids and WGS84 locations; edges carry travel time in seconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weighted road network
//!
//! The network is a directed multigraph built once at startup and shared
//! read-only between requests. Node order is insertion order, which is also
//! the tie-break order of nearest-node resolution. Edge lists per node keep
//! insertion order, so identical input always yields an identical layout.

use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque node identifier (an OSM node id in drive-network exports)
pub type NodeId = u64;

/// A network node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkNode {
    /// Opaque id
    pub id: NodeId,
    /// Location
    pub location: GeoPoint,
}

/// Outgoing edge as stored in the adjacency array
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkEdge {
    /// Target node index
    pub target: usize,
    /// Traversal time (s)
    pub travel_time_seconds: f64,
    /// Posted or imputed speed (km/h)
    pub speed_kmh: Option<f64>,
}

/// Reasons a network cannot be built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkBuildError {
    /// Same node id added twice
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),
    /// Node coordinates out of range
    #[error("Node {id} has invalid coordinates {location}")]
    InvalidLocation {
        /// Offending node
        id: NodeId,
        /// Supplied location
        location: GeoPoint,
    },
    /// Edge references a node that was never added
    #[error("Edge {from}->{to} references unknown node {missing}")]
    UnknownNode {
        /// Edge source
        from: NodeId,
        /// Edge target
        to: NodeId,
        /// The id that is missing
        missing: NodeId,
    },
    /// Edge weight is negative or not finite
    #[error("Edge {from}->{to} has invalid travel time {travel_time}")]
    InvalidWeight {
        /// Edge source
        from: NodeId,
        /// Edge target
        to: NodeId,
        /// Supplied weight
        travel_time: f64,
    },
}

/// Immutable directed multigraph with travel-time weights
#[derive(Debug, Clone, Default)]
pub struct WeightedNetwork {
    nodes: Vec<NetworkNode>,
    index_by_id: HashMap<NodeId, usize>,
    /// `offsets[i]..offsets[i + 1]` is the slice of `edges` leaving node `i`
    offsets: Vec<usize>,
    edges: Vec<NetworkEdge>,
}

impl WeightedNetwork {
    /// Start building a network
    #[must_use]
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// Build from the serialized node/edge records
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found in the records
    pub fn from_records(records: NetworkRecords) -> Result<Self, NetworkBuildError> {
        let mut builder = Self::builder();
        for node in records.nodes {
            builder.add_node(
                node.id,
                GeoPoint {
                    lat: node.lat,
                    lng: node.lng,
                },
            )?;
        }
        for edge in records.edges {
            builder.add_edge(edge.u, edge.v, edge.travel_time, edge.speed_kph)?;
        }
        Ok(builder.build())
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the network has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order
    #[must_use]
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Node at an index
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&NetworkNode> {
        self.nodes.get(index)
    }

    /// Index of a node id
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    /// Edges leaving a node index
    #[must_use]
    pub fn outgoing(&self, index: usize) -> &[NetworkEdge] {
        match (self.offsets.get(index), self.offsets.get(index + 1)) {
            (Some(&start), Some(&end)) => &self.edges[start..end],
            _ => &[],
        }
    }
}

/// Incremental constructor for [`WeightedNetwork`]
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<NetworkNode>,
    index_by_id: HashMap<NodeId, usize>,
    pending: Vec<(usize, NetworkEdge)>,
}

impl NetworkBuilder {
    /// Add a node
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id or out-of-range coordinates
    pub fn add_node(&mut self, id: NodeId, location: GeoPoint) -> Result<&mut Self, NetworkBuildError> {
        if !location.is_valid() {
            return Err(NetworkBuildError::InvalidLocation { id, location });
        }
        if self.index_by_id.contains_key(&id) {
            return Err(NetworkBuildError::DuplicateNode(id));
        }
        self.index_by_id.insert(id, self.nodes.len());
        self.nodes.push(NetworkNode { id, location });
        Ok(self)
    }

    /// Add a directed edge between two existing nodes
    ///
    /// # Errors
    ///
    /// Fails when an endpoint is unknown or the weight is negative or not finite
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        travel_time_seconds: f64,
        speed_kmh: Option<f64>,
    ) -> Result<&mut Self, NetworkBuildError> {
        if !travel_time_seconds.is_finite() || travel_time_seconds < 0.0 {
            return Err(NetworkBuildError::InvalidWeight {
                from,
                to,
                travel_time: travel_time_seconds,
            });
        }
        let source = self.resolve(from, to, from)?;
        let target = self.resolve(from, to, to)?;
        self.pending.push((
            source,
            NetworkEdge {
                target,
                travel_time_seconds,
                speed_kmh,
            },
        ));
        Ok(self)
    }

    fn resolve(&self, from: NodeId, to: NodeId, id: NodeId) -> Result<usize, NetworkBuildError> {
        self.index_by_id
            .get(&id)
            .copied()
            .ok_or(NetworkBuildError::UnknownNode {
                from,
                to,
                missing: id,
            })
    }

    /// Freeze into the CSR layout
    #[must_use]
    pub fn build(mut self) -> WeightedNetwork {
        // stable: parallel edges keep their insertion order
        self.pending.sort_by_key(|(source, _)| *source);

        let mut offsets = Vec::with_capacity(self.nodes.len() + 1);
        let mut edges = Vec::with_capacity(self.pending.len());
        let mut cursor = self.pending.into_iter().peekable();

        for index in 0..self.nodes.len() {
            offsets.push(edges.len());
            while let Some((_, edge)) = cursor.next_if(|(source, _)| *source == index) {
                edges.push(edge);
            }
        }
        offsets.push(edges.len());

        WeightedNetwork {
            nodes: self.nodes,
            index_by_id: self.index_by_id,
            offsets,
            edges,
        }
    }
}

/// Serialized node record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Opaque id
    pub id: NodeId,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Serialized edge record, attribute names as in drive-network exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node id
    pub u: NodeId,
    /// Target node id
    pub v: NodeId,
    /// Traversal time (s)
    pub travel_time: f64,
    /// Speed (km/h)
    #[serde(default)]
    pub speed_kph: Option<f64>,
}

/// On-disk road network document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkRecords {
    /// Nodes
    pub nodes: Vec<NodeRecord>,
    /// Directed edges
    pub edges: Vec<EdgeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn test_builder_groups_edges_by_source() {
        let mut builder = WeightedNetwork::builder();
        builder.add_node(10, point(17.0, 78.0)).unwrap();
        builder.add_node(20, point(17.1, 78.1)).unwrap();
        builder.add_node(30, point(17.2, 78.2)).unwrap();
        builder.add_edge(30, 10, 5.0, None).unwrap();
        builder.add_edge(10, 20, 1.0, Some(40.0)).unwrap();
        builder.add_edge(10, 20, 2.0, None).unwrap();
        let network = builder.build();

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);

        let first = network.outgoing(0);
        assert_eq!(first.len(), 2);
        assert!((first[0].travel_time_seconds - 1.0).abs() < f64::EPSILON);
        assert!((first[1].travel_time_seconds - 2.0).abs() < f64::EPSILON);
        assert!(network.outgoing(1).is_empty());
        assert_eq!(network.outgoing(2)[0].target, 0);
        assert!(network.outgoing(99).is_empty());
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let mut builder = WeightedNetwork::builder();
        builder.add_node(1, point(0.0, 0.0)).unwrap();

        assert_eq!(
            builder.add_node(1, point(1.0, 1.0)).unwrap_err(),
            NetworkBuildError::DuplicateNode(1)
        );
        assert!(builder.add_node(2, point(100.0, 0.0)).is_err());
        assert!(matches!(
            builder.add_edge(1, 7, 3.0, None),
            Err(NetworkBuildError::UnknownNode { missing: 7, .. })
        ));
        assert!(matches!(
            builder.add_edge(1, 1, -3.0, None),
            Err(NetworkBuildError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_from_records() {
        let records: NetworkRecords = serde_json::from_value(serde_json::json!({
            "nodes": [
                {"id": 1, "lat": 17.0, "lng": 78.0},
                {"id": 2, "lat": 17.01, "lng": 78.0}
            ],
            "edges": [
                {"u": 1, "v": 2, "travel_time": 42.5, "speed_kph": 30.0}
            ]
        }))
        .unwrap();

        let network = WeightedNetwork::from_records(records).unwrap();
        assert_eq!(network.index_of(2), Some(1));
        assert_eq!(network.outgoing(0)[0].speed_kmh, Some(30.0));
    }
}
