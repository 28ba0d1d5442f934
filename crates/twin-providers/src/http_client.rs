// ABOUTME: HTTP client construction for outbound feed calls
// ABOUTME: Each feed owns a pooled client with its own request and connect timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent to upstream feeds
const USER_AGENT: &str = concat!("digital-twin-server/", env!("CARGO_PKG_VERSION"));

/// Create a client with its own timeouts
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
