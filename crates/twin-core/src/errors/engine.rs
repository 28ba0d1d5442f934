// ABOUTME: Typed failures of the routing, spatial, and alert components
// ABOUTME: Routing and spatial errors are absorbed by the scenario engine; alert errors surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Failures of the network overlay router
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// No road network was loaded
    #[error("Road network is not available")]
    NetworkUnavailable,

    /// A point or node id could not be mapped to a network node
    #[error("Could not resolve network node: {reason}")]
    NodeResolution {
        /// What failed to resolve
        reason: String,
    },

    /// Origin and destination are not connected
    #[error("No route from node {from} to node {to}")]
    NoRouteFound {
        /// Origin node id
        from: u64,
        /// Destination node id
        to: u64,
    },

    /// An overlay edge cannot be turned into a travel time
    #[error("Invalid overlay edge {from}-{to}: {reason}")]
    InvalidOverlay {
        /// First endpoint id
        from: u64,
        /// Second endpoint id
        to: u64,
        /// Why the edge was rejected
        reason: &'static str,
    },
}

/// Failures of the spatial hotspot index
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    /// A line geometry needs at least two points
    #[error("Line geometry needs at least 2 points, got {points}")]
    EmptyGeometry {
        /// Number of points supplied
        points: usize,
    },
}

/// Failures of the rainfall alert generator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertError {
    /// The hotspot dataset is not loaded
    #[error("Flood hotspot dataset not loaded on server")]
    DatasetUnavailable,
}

impl From<AlertError> for AppError {
    fn from(error: AlertError) -> Self {
        Self::unavailable(error.to_string()).with_source(error)
    }
}

impl From<RoutingError> for AppError {
    fn from(error: RoutingError) -> Self {
        match error {
            RoutingError::NetworkUnavailable => Self::unavailable(error.to_string()),
            RoutingError::NodeResolution { .. } | RoutingError::InvalidOverlay { .. } => {
                Self::invalid_input(error.to_string())
            }
            RoutingError::NoRouteFound { .. } => {
                Self::new(ErrorCode::ResourceNotFound, error.to_string())
            }
        }
    }
}

impl From<SpatialError> for AppError {
    fn from(error: SpatialError) -> Self {
        Self::invalid_input(error.to_string()).with_source(error)
    }
}
