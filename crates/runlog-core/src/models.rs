// ABOUTME: Data model for the import: raw export rows, normalized activities, and zone records
// ABOUTME: Activity and ZoneRecord serialize to the flat key-value shape sent to the time-series store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - [`RawRow`]: one typed line of the HealthExport CSV
//! - [`Activity`]: one normalized run, keyed by its UTC start timestamp
//! - [`ZoneRecord`]: one heart-rate zone percentage of an activity

use serde::{Deserialize, Serialize};

use crate::date_range::resolve_start_timestamp;
use crate::errors::AppResult;

/// One line of the HealthExport CSV after schema validation
///
/// Only the date range, activity label, distance, and duration are
/// mandatory; every physiological field may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Raw `"<start> - <end>"` string as exported
    pub date_range: String,
    /// Start of the date range resolved as UTC epoch seconds
    pub started_at: i64,
    /// Activity type label, e.g. `Running`
    pub activity: String,
    /// Active energy burned (kcal)
    pub active_energy_kcal: Option<f64>,
    /// Distance (km)
    pub distance_km: f64,
    /// Duration (s)
    pub duration_secs: f64,
    /// Elevation ascended (m)
    pub elevation_ascended_m: Option<f64>,
    /// Maximum elevation (m)
    pub elevation_maximum_m: Option<f64>,
    /// Minimum elevation (m)
    pub elevation_minimum_m: Option<f64>,
    /// Fractions (0-1) of time spent in zones A to E
    pub heart_rate_zones: [Option<f64>; 5],
    /// Average heart rate (bpm)
    pub heart_rate_average: Option<f64>,
    /// Maximum heart rate (bpm)
    pub heart_rate_maximum: Option<f64>,
    /// METs average (kcal/hr·kg)
    pub mets_average: Option<f64>,
}

impl RawRow {
    /// Create a row with the mandatory fields set and everything else absent
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` if `date_range` cannot be resolved.
    pub fn new(
        date_range: impl Into<String>,
        activity: impl Into<String>,
        distance_km: f64,
        duration_secs: f64,
    ) -> AppResult<Self> {
        let date_range = date_range.into();
        let started_at = resolve_start_timestamp(&date_range)?;
        Ok(Self {
            date_range,
            started_at,
            activity: activity.into(),
            active_energy_kcal: None,
            distance_km,
            duration_secs,
            elevation_ascended_m: None,
            elevation_maximum_m: None,
            elevation_minimum_m: None,
            heart_rate_zones: [None; 5],
            heart_rate_average: None,
            heart_rate_maximum: None,
            mets_average: None,
        })
    }

    /// Whether the row reports a usable ascended elevation
    ///
    /// The phone export always fills it; the secondary tracker leaves it
    /// empty or zero.
    #[must_use]
    pub fn has_ascended_elevation(&self) -> bool {
        self.elevation_ascended_m.is_some_and(|m| m != 0.0)
    }
}

/// One normalized run, as logged to the activity collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Destination collection
    pub collection: String,
    /// UTC epoch seconds of the run start; identity key within a collection
    pub timestamp: i64,
    /// Active energy burned (kcal)
    pub kcal: Option<f64>,
    /// Activity type label
    pub activity_type: String,
    /// Distance (km)
    pub distance_km: f64,
    /// Duration (minutes, 1 decimal place)
    pub duration_mins_f: f64,
    /// Pace (minutes per km, 2 decimal places)
    pub pace_mins_per_km: f64,
    /// Elevation ascended (whole metres)
    pub elevation_ascended_m: Option<i64>,
    /// Maximum elevation (whole metres)
    pub elevation_maximum_m: Option<i64>,
    /// Minimum elevation (whole metres)
    pub elevation_minimum_m: Option<i64>,
    /// Zone A fraction
    pub heart_rate_a: Option<f64>,
    /// Zone B fraction
    pub heart_rate_b: Option<f64>,
    /// Zone C fraction
    pub heart_rate_c: Option<f64>,
    /// Zone D fraction
    pub heart_rate_d: Option<f64>,
    /// Zone E fraction
    pub heart_rate_e: Option<f64>,
    /// Average heart rate rounded to the nearest bpm
    pub heart_rate_avg_rounded_i: Option<i64>,
    /// Maximum heart rate (bpm)
    pub heart_rate_max: Option<f64>,
    /// METs average
    pub mets_average: Option<f64>,
    /// Pace/heart-rate score in (0, 1]
    pub score: Option<f64>,
}

impl Activity {
    /// Zone fractions in fixed A..E order
    #[must_use]
    pub const fn zone_fractions(&self) -> [Option<f64>; 5] {
        [
            self.heart_rate_a,
            self.heart_rate_b,
            self.heart_rate_c,
            self.heart_rate_d,
            self.heart_rate_e,
        ]
    }
}

/// Percentage of one activity spent in one heart-rate zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Destination collection
    pub collection: String,
    /// Timestamp of the parent activity
    pub timestamp: i64,
    /// Zone label, e.g. `Easy (A)`
    pub zone: String,
    /// Percentage 0-100, 1 decimal place
    pub value: Option<f64>,
}
