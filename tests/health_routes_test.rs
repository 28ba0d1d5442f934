// ABOUTME: Integration tests for liveness and readiness routes
// ABOUTME: Readiness reflects which datasets were loaded at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use digital_twin_server::datasets::Datasets;
use digital_twin_server::server::build_router;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures;
use serde_json::Value;
use std::sync::Arc;
use twin_providers::StaticRainfallProvider;

#[tokio::test]
async fn test_health_is_always_healthy() {
    let app = build_router(fixtures::resources(
        Datasets::default(),
        Arc::new(StaticRainfallProvider::new(Vec::new())),
    ));
    let body: Value = AxumTestRequest::get("/health")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_is_degraded_without_datasets() {
    let app = build_router(fixtures::resources(
        Datasets::default(),
        Arc::new(StaticRainfallProvider::new(Vec::new())),
    ));
    let body: Value = AxumTestRequest::get("/ready")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "degraded");
    assert!(body["datasets"]["hotspots"].is_null());
    assert_eq!(body["rainfall_provider"], "static");
}

#[tokio::test]
async fn test_ready_with_datasets() {
    let app = build_router(fixtures::resources(
        Datasets {
            hotspots: Some(fixtures::hotspots(5)),
            network: Some(fixtures::network()),
        },
        Arc::new(StaticRainfallProvider::new(Vec::new())),
    ));
    let body: Value = AxumTestRequest::get("/ready").send(app).await.json();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["datasets"]["hotspots"], 5);
    assert_eq!(body["datasets"]["road_network_nodes"], 3);
    assert_eq!(body["datasets"]["road_network_edges"], 4);
}
