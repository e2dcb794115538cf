// ABOUTME: Converts one validated export row into a canonical Activity record
// ABOUTME: Derives duration, pace, rounded heart rate and elevation, and the bounded run score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Activity normalization
//!
//! Missing physiological values stay missing: an absent elevation or heart
//! rate is never turned into a zero.

use crate::errors::{AppError, AppResult};
use crate::models::{Activity, RawRow};
use crate::score::{score_run, ScoreBounds};

/// Round `value` to `places` decimal places, halves away from zero
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn round_whole(value: Option<f64>) -> Option<i64> {
    value.map(|v| v.round() as i64)
}

/// Normalize one row into an [`Activity`] for `collection`
///
/// # Errors
///
/// Returns `InvalidRow` when the distance is zero, negative, or not finite,
/// or when the duration is negative or not finite, since pace would be
/// undefined.
pub fn normalize_row(row: &RawRow, collection: &str, bounds: &ScoreBounds) -> AppResult<Activity> {
    if !row.distance_km.is_finite() || row.distance_km <= 0.0 {
        return Err(AppError::invalid_row(format!(
            "run starting at {} has no usable distance",
            row.started_at
        )));
    }
    if !row.duration_secs.is_finite() || row.duration_secs < 0.0 {
        return Err(AppError::invalid_row(format!(
            "run starting at {} has a negative duration",
            row.started_at
        )));
    }

    let duration_mins = row.duration_secs / 60.0;
    let pace = duration_mins / row.distance_km;
    let score = row
        .heart_rate_average
        .map(|heart_rate| score_run(bounds, pace, heart_rate));
    let [zone_a, zone_b, zone_c, zone_d, zone_e] = row.heart_rate_zones;

    Ok(Activity {
        collection: collection.to_owned(),
        timestamp: row.started_at,
        kcal: row.active_energy_kcal,
        activity_type: row.activity.clone(),
        distance_km: row.distance_km,
        duration_mins_f: round_to(duration_mins, 1),
        pace_mins_per_km: round_to(pace, 2),
        elevation_ascended_m: round_whole(row.elevation_ascended_m),
        elevation_maximum_m: round_whole(row.elevation_maximum_m),
        elevation_minimum_m: round_whole(row.elevation_minimum_m),
        heart_rate_a: zone_a,
        heart_rate_b: zone_b,
        heart_rate_c: zone_c,
        heart_rate_d: zone_d,
        heart_rate_e: zone_e,
        heart_rate_avg_rounded_i: round_whole(row.heart_rate_average),
        heart_rate_max: row.heart_rate_maximum,
        mets_average: row.mets_average,
        score,
    })
}
