// ABOUTME: Rainfall to flood alert mapping with deterministic hotspot selection
// ABOUTME: Severity tiers and activation fractions follow fixed rainfall thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::alerts::{
    FULL_ACTIVATION, HIGH_ACTIVATION, HIGH_MAX_MM, LOW_ACTIVATION, LOW_MAX_MM,
    MODERATE_ACTIVATION, MODERATE_MAX_MM, NO_HOTSPOTS_ACTION, NO_HOTSPOTS_MESSAGE,
    SEVERE_ACTIVATION, SEVERE_MAX_MM,
};
use crate::errors::AlertError;
use crate::models::{Alert, BoundingBox, Hotspot, Severity};
use crate::spatial::hotspots_in_bounding_box;

/// Severity tier for a rainfall amount (mm)
#[must_use]
pub fn classify_severity(rainfall_mm: f64) -> Severity {
    if rainfall_mm < LOW_MAX_MM {
        Severity::Low
    } else if rainfall_mm < MODERATE_MAX_MM {
        Severity::Moderate
    } else if rainfall_mm < HIGH_MAX_MM {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Share of hotspots assumed active for a rainfall amount (mm)
#[must_use]
pub fn activation_fraction(rainfall_mm: f64) -> f64 {
    if rainfall_mm < LOW_MAX_MM {
        LOW_ACTIVATION
    } else if rainfall_mm < MODERATE_MAX_MM {
        MODERATE_ACTIVATION
    } else if rainfall_mm < HIGH_MAX_MM {
        HIGH_ACTIVATION
    } else if rainfall_mm < SEVERE_MAX_MM {
        SEVERE_ACTIVATION
    } else {
        FULL_ACTIVATION
    }
}

/// Build the alert for a rainfall amount over the (optionally boxed) dataset
///
/// The first `max(1, floor(total * fraction))` hotspots in dataset order are
/// reported as affected.
///
/// # Errors
///
/// `DatasetUnavailable` when no hotspot dataset is loaded
pub fn generate_alert(
    hotspots: Option<&[Hotspot]>,
    rainfall_mm: f64,
    bbox: Option<&BoundingBox>,
) -> Result<Alert, AlertError> {
    let hotspots = hotspots.ok_or(AlertError::DatasetUnavailable)?;

    let candidates = match bbox {
        Some(bbox) => hotspots_in_bounding_box(hotspots, bbox),
        None => hotspots.to_vec(),
    };

    if candidates.is_empty() {
        return Ok(Alert {
            severity: Severity::Low,
            affected_count: 0,
            affected_points: Vec::new(),
            message: NO_HOTSPOTS_MESSAGE.to_owned(),
            recommended_actions: vec![NO_HOTSPOTS_ACTION.to_owned()],
            rainfall_mm,
        });
    }

    let total = candidates.len();
    let affected_count = ((total as f64 * activation_fraction(rainfall_mm)).floor() as usize)
        .clamp(1, total);
    let severity = classify_severity(rainfall_mm);

    let mut affected_points = candidates;
    affected_points.truncate(affected_count);

    Ok(Alert {
        severity,
        affected_count,
        affected_points,
        message: severity.message().to_owned(),
        recommended_actions: severity
            .recommended_actions()
            .iter()
            .map(|action| (*action).to_owned())
            .collect(),
        rainfall_mm,
    })
}
