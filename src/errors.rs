// ABOUTME: Error types surfaced by the HTTP layer
// ABOUTME: Re-exports the unified AppError system together with feed and dataset failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every handler returns [`AppResult`]; domain failures convert into
//! [`AppError`] through `From` impls and render as
//! `{"error": {"code", "message"}}` with the status of their code.

pub use crate::datasets::DatasetError;
pub use twin_core::errors::{
    AlertError, AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
    RoutingError, SpatialError,
};
pub use twin_providers::ForecastFetchError;
