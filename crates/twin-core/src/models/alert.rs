// ABOUTME: Flood alert models: severity tiers, per-tier messaging, and the alert payload
// ABOUTME: Also defines hourly rainfall samples consumed by forecast summation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::hotspot::Hotspot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flood alert severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Less than 10 mm
    Low,
    /// 10 mm to less than 25 mm
    Moderate,
    /// 25 mm to less than 50 mm
    High,
    /// 50 mm and above
    Critical,
}

impl Severity {
    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Public-facing message for this tier
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Low => "Low flood risk.",
            Self::Moderate => "Moderate risk — localized hotspots possible.",
            Self::High => "High risk — many hotspots likely to be affected.",
            Self::Critical => "Critical risk — widespread inundation possible.",
        }
    }

    /// Recommended operational actions for this tier
    #[must_use]
    pub const fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &["Monitor rainfall trends"],
            Self::Moderate => &["Prepare pumps and alert local teams"],
            Self::High => &["Issue city-wide advisories", "Mobilize maintenance teams"],
            Self::Critical => &["Activate emergency operations", "Prepare evacuations"],
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graded flood alert for one rainfall amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Severity tier
    pub severity: Severity,
    /// Number of hotspots assumed active
    pub affected_count: usize,
    /// The active hotspots, in dataset order
    pub affected_points: Vec<Hotspot>,
    /// Public-facing message
    pub message: String,
    /// Recommended operational actions
    pub recommended_actions: Vec<String>,
    /// Rainfall amount the alert was generated for (mm)
    pub rainfall_mm: f64,
}

/// One hourly rainfall reading from the forecast feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallSample {
    /// Start of the hour, UTC
    pub timestamp: DateTime<Utc>,
    /// Rainfall in that hour (mm), never negative
    pub rainfall_mm: f64,
}
