// ABOUTME: Failures of the rainfall forecast feed and their mapping onto AppError
// ABOUTME: Timeouts and transport failures read as unavailable; bad answers as upstream errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use twin_core::errors::AppError;

/// Why a forecast could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastFetchError {
    /// No answer within the configured timeout
    #[error("Rainfall feed timed out after {after_secs}s")]
    Timeout {
        /// Configured timeout
        after_secs: u64,
    },

    /// Upstream answered with a non-2xx status
    #[error("Rainfall feed returned status {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Connection-level failure
    #[error("Rainfall feed request failed: {0}")]
    Transport(String),

    /// Body was not the expected JSON shape
    #[error("Rainfall feed response could not be decoded: {0}")]
    Decode(String),
}

impl ForecastFetchError {
    /// Classify a reqwest failure
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                after_secs: timeout_secs,
            }
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<ForecastFetchError> for AppError {
    fn from(error: ForecastFetchError) -> Self {
        match &error {
            ForecastFetchError::Timeout { .. } | ForecastFetchError::Transport(_) => {
                Self::external_unavailable("Rainfall feed", error.to_string())
            }
            ForecastFetchError::HttpStatus { .. } | ForecastFetchError::Decode(_) => {
                Self::external_service("Rainfall feed", error.to_string())
            }
        }
        .with_source(error)
    }
}
