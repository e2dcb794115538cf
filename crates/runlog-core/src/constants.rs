// ABOUTME: Import constants: HealthExport column literals, zone labels, and derivation tunables
// ABOUTME: Column names form the wire contract with the upstream export tool and must match exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module

/// Column headers of the HealthExport CSV, including units and punctuation
pub mod columns {
    /// Start/end date range, e.g. `2021-10-04 08:07:18 - 2021-10-04 08:40:04`
    pub const DATE: &str = "Date";
    /// Active energy burned in kcal
    pub const ACTIVE_ENERGY_KCAL: &str = "Active energy burned(kcal)";
    /// Activity type label, e.g. `Running`
    pub const ACTIVITY: &str = "Activity";
    /// Distance in kilometres
    pub const DISTANCE_KM: &str = "Distance(km)";
    /// Duration in seconds
    pub const DURATION_S: &str = "Duration(s)";
    /// Elevation ascended in metres
    pub const ELEVATION_ASCENDED_M: &str = "Elevation: Ascended(m)";
    /// Maximum elevation in metres
    pub const ELEVATION_MAXIMUM_M: &str = "Elevation: Maximum(m)";
    /// Minimum elevation in metres
    pub const ELEVATION_MINIMUM_M: &str = "Elevation: Minimum(m)";
    /// Zone A fraction
    pub const HR_ZONE_A: &str = "Heart rate zone: A Easy (<115bpm)(%)";
    /// Zone B fraction
    pub const HR_ZONE_B: &str = "Heart rate zone: B Fat Burn (115-135bpm)(%)";
    /// Zone C fraction
    pub const HR_ZONE_C: &str = "Heart rate zone: C Moderate Training (135-155bpm)(%)";
    /// Zone D fraction
    pub const HR_ZONE_D: &str = "Heart rate zone: D Hard Training (155-175bpm)(%)";
    /// Zone E fraction
    pub const HR_ZONE_E: &str = "Heart rate zone: E Extreme Training (>175bpm)(%)";
    /// Average heart rate
    pub const HR_AVERAGE: &str = "Heart rate: Average(count/min)";
    /// Maximum heart rate
    pub const HR_MAXIMUM: &str = "Heart rate: Maximum(count/min)";
    /// METs average
    pub const METS_AVERAGE: &str = "METs Average(kcal/hr·kg)";
}

/// Activity-type label kept by the import filter
pub const RUNNING_ACTIVITY: &str = "Running";

/// Separator between the start and end side of the `Date` column
pub const DATE_RANGE_SEPARATOR: &str = " - ";

/// Naive timestamp layouts accepted on the start side of the date range,
/// tried in order
pub const EXPORT_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Rows whose start timestamps are this close (inclusive) describe the same run
pub const DUPLICATE_WINDOW_SECS: i64 = 10;

/// Lowest value a normalized sub-score may take
pub const SUB_SCORE_FLOOR: f64 = 0.01;

/// Display labels of the five heart-rate zones, in emission order
pub const ZONE_LABELS: [&str; 5] = [
    "Easy (A)",
    "Fat Burn (B)",
    "Build Fitness (C)",
    "Training (D)",
    "Extreme (E)",
];
