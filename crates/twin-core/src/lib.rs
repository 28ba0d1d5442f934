// ABOUTME: Core types and constants for the digital twin scenario and flood alert service
// ABOUTME: Foundation crate with error handling, domain models, and engine constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Twin Core
//!
//! Foundation crate providing shared types and constants for the digital twin
//! scenario engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Engine constants organized by domain
//! - **models**: Geographic points, hotspots, intervention requests, scenario results, alerts

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Engine constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (`GeoPoint`, `Hotspot`, `InterventionRequest`, `Alert`, etc.)
pub mod models;
