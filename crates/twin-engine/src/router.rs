// ABOUTME: Shortest travel time over the road network with request-scoped overlay edges
// ABOUTME: Dijkstra over base plus overlay successors; overlays are never merged into the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Network overlay router
//!
//! A what-if road is modelled as extra edges layered on top of the shared
//! [`WeightedNetwork`]. The base graph stays untouched; each request carries
//! its own [`Overlay`], which the search reads alongside the base adjacency.

use crate::constants::geodesy::SECONDS_PER_HOUR;
use crate::errors::RoutingError;
use crate::models::GeoPoint;
use crate::network::{NodeId, WeightedNetwork};
use pathfinding::prelude::dijkstra;
use std::collections::BTreeMap;

/// Search costs are whole microseconds
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// A hypothetical road segment between two existing nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayEdge {
    /// First endpoint
    pub from: NodeId,
    /// Second endpoint
    pub to: NodeId,
    /// Segment length (km)
    pub length_km: f64,
    /// Design speed (km/h)
    pub speed_kmh: f64,
}

impl OverlayEdge {
    /// Traversal time in seconds
    ///
    /// # Errors
    ///
    /// Fails when speed is not positive or either value is not finite
    pub fn travel_time_seconds(&self) -> Result<f64, RoutingError> {
        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            return Err(self.invalid("speed must be a positive number"));
        }
        if !self.length_km.is_finite() || self.length_km < 0.0 {
            return Err(self.invalid("length must be a non-negative number"));
        }
        Ok(self.length_km / self.speed_kmh * SECONDS_PER_HOUR)
    }

    const fn invalid(&self, reason: &'static str) -> RoutingError {
        RoutingError::InvalidOverlay {
            from: self.from,
            to: self.to,
            reason,
        }
    }
}

/// Request-scoped extra edges, keyed by `(source index, target index)`
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    edges: BTreeMap<(usize, usize), f64>,
}

impl Overlay {
    /// Resolve overlay edges against a network, inserting each in both directions
    ///
    /// # Errors
    ///
    /// `NodeResolution` for ids missing from the network, `InvalidOverlay` for bad speeds
    pub fn resolve(network: &WeightedNetwork, edges: &[OverlayEdge]) -> Result<Self, RoutingError> {
        let mut overlay = Self::default();
        for edge in edges {
            let seconds = edge.travel_time_seconds()?;
            let from = index_of(network, edge.from)?;
            let to = index_of(network, edge.to)?;
            overlay.insert(from, to, seconds);
            overlay.insert(to, from, seconds);
        }
        Ok(overlay)
    }

    fn insert(&mut self, from: usize, to: usize, seconds: f64) {
        self.edges
            .entry((from, to))
            .and_modify(|existing| *existing = existing.min(seconds))
            .or_insert(seconds);
    }

    /// Number of directed overlay edges
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the overlay adds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn outgoing(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.edges
            .range((index, 0)..=(index, usize::MAX))
            .map(|(&(_, target), &seconds)| (target, seconds))
    }
}

fn index_of(network: &WeightedNetwork, id: NodeId) -> Result<usize, RoutingError> {
    network
        .index_of(id)
        .ok_or_else(|| RoutingError::NodeResolution {
            reason: format!("overlay node {id} is not in the road network"),
        })
}

/// Index of the node closest to `point` in planar `(lng, lat)` degrees
fn nearest_index(network: &WeightedNetwork, point: &GeoPoint) -> Result<usize, RoutingError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, node) in network.nodes().iter().enumerate() {
        let dx = node.location.lng - point.lng;
        let dy = node.location.lat - point.lat;
        let distance = dx.mul_add(dx, dy * dy);
        // strict comparison keeps the earliest node on ties
        if best.map_or(true, |(_, current)| distance < current) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
        .ok_or_else(|| RoutingError::NodeResolution {
            reason: "road network has no nodes".to_owned(),
        })
}

/// Id of the node closest to `point`
///
/// # Errors
///
/// `NetworkUnavailable` without a network, `NodeResolution` when it is empty
pub fn nearest_node(
    network: Option<&WeightedNetwork>,
    point: &GeoPoint,
) -> Result<NodeId, RoutingError> {
    let network = network.ok_or(RoutingError::NetworkUnavailable)?;
    let index = nearest_index(network, point)?;
    network
        .node(index)
        .map(|node| node.id)
        .ok_or_else(|| RoutingError::NodeResolution {
            reason: format!("node index {index} out of range"),
        })
}

/// Shortest travel time in seconds between the nodes nearest to two points
///
/// # Errors
///
/// Any [`RoutingError`]; callers in the scenario engine fall back to heuristics
pub fn shortest_travel_time(
    network: Option<&WeightedNetwork>,
    origin: &GeoPoint,
    destination: &GeoPoint,
    overlay_edges: &[OverlayEdge],
) -> Result<f64, RoutingError> {
    let network = network.ok_or(RoutingError::NetworkUnavailable)?;
    let overlay = Overlay::resolve(network, overlay_edges)?;
    let source = nearest_index(network, origin)?;
    let target = nearest_index(network, destination)?;

    if source == target {
        return Ok(0.0);
    }

    fastest_path_seconds(network, &overlay, source, target).ok_or_else(|| {
        let id = |index: usize| network.node(index).map_or(0, |node| node.id);
        RoutingError::NoRouteFound {
            from: id(source),
            to: id(target),
        }
    })
}

fn fastest_path_seconds(
    network: &WeightedNetwork,
    overlay: &Overlay,
    source: usize,
    target: usize,
) -> Option<f64> {
    // a simple path has fewer edges than nodes, so capped costs cannot overflow
    let cap = u64::MAX / (network.node_count() as u64).max(1);
    let (_, micros) = dijkstra(
        &source,
        move |&u| {
            network
                .outgoing(u)
                .iter()
                .map(|edge| (edge.target, edge.travel_time_seconds))
                .chain(overlay.outgoing(u))
                .map(move |(v, seconds)| (v, to_micros(seconds, cap)))
        },
        |&u| u == target,
    )?;
    Some(micros as f64 / MICROS_PER_SECOND)
}

fn to_micros(seconds: f64, cap: u64) -> u64 {
    ((seconds * MICROS_PER_SECOND).round() as u64).min(cap)
}
