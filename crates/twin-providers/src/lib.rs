// ABOUTME: External data providers for the digital twin service
// ABOUTME: Rainfall forecast feed implementations and the HTTP client they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! External data providers.
//!
//! The only outbound dependency of the service is the hourly rainfall
//! forecast. Providers implement [`rainfall::RainfallProvider`] so the server
//! can swap the live feed for fixed data.

/// Feed failures
pub mod errors;
/// HTTP client construction
pub mod http_client;
/// Rainfall providers
pub mod rainfall;

pub use errors::ForecastFetchError;
pub use rainfall::{OpenMeteoProvider, RainfallFeedConfig, RainfallProvider, StaticRainfallProvider};
