// ABOUTME: Parses HealthExport CSV text into strictly typed export rows
// ABOUTME: Collects every row-level issue with its source line instead of stopping at the first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HealthExport CSV parsing
//!
//! Column headers are matched exactly, units and punctuation included.
//! Columns the importer does not use (weather, for instance) are ignored.
//! Cells are trimmed and an empty cell is an absent value. The date range
//! is resolved here so a malformed one is reported like any other bad
//! cell, and so is a `NaN` or infinite number in any numeric column.

use csv::{Position, ReaderBuilder, StringRecord, Trim};
use runlog_core::constants::columns;
use runlog_core::{AppError, AppResult, ParseIssue, RawRow};
use serde::Deserialize;
use tracing::debug;

/// Line of the header row
const HEADER_LINE: u64 = 1;

/// Columns that must be present in the header
const REQUIRED_COLUMNS: [&str; 4] = [
    columns::DATE,
    columns::ACTIVITY,
    columns::DISTANCE_KM,
    columns::DURATION_S,
];

/// One CSV record as written by HealthExport
#[derive(Debug, Deserialize)]
struct ExportRecord {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Active energy burned(kcal)")]
    active_energy_kcal: Option<f64>,
    #[serde(rename = "Activity")]
    activity: Option<String>,
    #[serde(rename = "Distance(km)")]
    distance_km: Option<f64>,
    #[serde(rename = "Duration(s)")]
    duration_secs: Option<f64>,
    #[serde(rename = "Elevation: Ascended(m)")]
    elevation_ascended_m: Option<f64>,
    #[serde(rename = "Elevation: Maximum(m)")]
    elevation_maximum_m: Option<f64>,
    #[serde(rename = "Elevation: Minimum(m)")]
    elevation_minimum_m: Option<f64>,
    #[serde(rename = "Heart rate zone: A Easy (<115bpm)(%)")]
    heart_rate_zone_a: Option<f64>,
    #[serde(rename = "Heart rate zone: B Fat Burn (115-135bpm)(%)")]
    heart_rate_zone_b: Option<f64>,
    #[serde(rename = "Heart rate zone: C Moderate Training (135-155bpm)(%)")]
    heart_rate_zone_c: Option<f64>,
    #[serde(rename = "Heart rate zone: D Hard Training (155-175bpm)(%)")]
    heart_rate_zone_d: Option<f64>,
    #[serde(rename = "Heart rate zone: E Extreme Training (>175bpm)(%)")]
    heart_rate_zone_e: Option<f64>,
    #[serde(rename = "Heart rate: Average(count/min)")]
    heart_rate_average: Option<f64>,
    #[serde(rename = "Heart rate: Maximum(count/min)")]
    heart_rate_maximum: Option<f64>,
    #[serde(rename = "METs Average(kcal/hr·kg)")]
    mets_average: Option<f64>,
}

fn required<T>(value: Option<T>, column: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing value for `{column}`"))
}

/// `NaN` and infinities parse as `f64` but are never valid measurements
fn finite(value: Option<f64>, column: &str) -> Result<Option<f64>, String> {
    match value {
        Some(v) if !v.is_finite() => Err(format!("non-finite value `{v}` for `{column}`")),
        other => Ok(other),
    }
}

impl ExportRecord {
    fn into_raw_row(self) -> Result<RawRow, String> {
        let date_range = required(self.date.filter(|d| !d.is_empty()), columns::DATE)?;
        let activity = required(self.activity.filter(|a| !a.is_empty()), columns::ACTIVITY)?;
        let distance_km = required(
            finite(self.distance_km, columns::DISTANCE_KM)?,
            columns::DISTANCE_KM,
        )?;
        let duration_secs = required(
            finite(self.duration_secs, columns::DURATION_S)?,
            columns::DURATION_S,
        )?;

        let row = RawRow::new(date_range, activity, distance_km, duration_secs)
            .map_err(|e| e.message)?;

        Ok(RawRow {
            active_energy_kcal: finite(self.active_energy_kcal, columns::ACTIVE_ENERGY_KCAL)?,
            elevation_ascended_m: finite(
                self.elevation_ascended_m,
                columns::ELEVATION_ASCENDED_M,
            )?,
            elevation_maximum_m: finite(self.elevation_maximum_m, columns::ELEVATION_MAXIMUM_M)?,
            elevation_minimum_m: finite(self.elevation_minimum_m, columns::ELEVATION_MINIMUM_M)?,
            heart_rate_zones: [
                finite(self.heart_rate_zone_a, columns::HR_ZONE_A)?,
                finite(self.heart_rate_zone_b, columns::HR_ZONE_B)?,
                finite(self.heart_rate_zone_c, columns::HR_ZONE_C)?,
                finite(self.heart_rate_zone_d, columns::HR_ZONE_D)?,
                finite(self.heart_rate_zone_e, columns::HR_ZONE_E)?,
            ],
            heart_rate_average: finite(self.heart_rate_average, columns::HR_AVERAGE)?,
            heart_rate_maximum: finite(self.heart_rate_maximum, columns::HR_MAXIMUM)?,
            mets_average: finite(self.mets_average, columns::METS_AVERAGE)?,
            ..row
        })
    }
}

fn check_headers(headers: &StringRecord) -> Vec<ParseIssue> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| ParseIssue::at_line(HEADER_LINE, format!("missing column `{column}`")))
        .collect()
}

fn parse_record(headers: &StringRecord, record: &StringRecord) -> Result<RawRow, String> {
    record
        .deserialize::<ExportRecord>(Some(headers))
        .map_err(|e| e.to_string())?
        .into_raw_row()
}

/// Parse the full text of a HealthExport CSV, header row included
///
/// Rows come back in source order.
///
/// # Errors
///
/// Returns `ParseFailed` carrying every issue found when the header lacks a
/// required column or any row fails to parse. No rows are returned in that
/// case.
pub fn parse_export(text: &str) -> AppResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::parse_failed(&[ParseIssue::at_line(HEADER_LINE, e.to_string())]))?
        .clone();

    let header_issues = check_headers(&headers);
    if !header_issues.is_empty() {
        return Err(AppError::parse_failed(&header_issues));
    }

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    for result in reader.records() {
        let parsed = result.map_err(|e| (e.position().map(Position::line), e.to_string()));
        let outcome = parsed.and_then(|record| {
            let line = record.position().map(Position::line);
            parse_record(&headers, &record).map_err(|message| (line, message))
        });

        match outcome {
            Ok(row) => rows.push(row),
            Err((line, message)) => issues.push(ParseIssue { line, message }),
        }
    }

    if !issues.is_empty() {
        debug!(issue_count = issues.len(), "Export rejected at parse stage");
        return Err(AppError::parse_failed(&issues));
    }

    debug!(row_count = rows.len(), "Export parsed");
    Ok(rows)
}
