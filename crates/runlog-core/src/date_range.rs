// ABOUTME: Resolves HealthExport "start - end" date ranges to UTC epoch seconds
// ABOUTME: Also renders the whole-day lookup window used when querying existing records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Date range resolution
//!
//! The export writes local wall-clock time without a zone. The importer
//! reads that wall-clock literally as UTC, so the result never depends on
//! the host's timezone.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::constants::{DATE_RANGE_SEPARATOR, EXPORT_DATETIME_FORMATS};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Resolve the start side of `"<start> - <end>"` to epoch seconds
///
/// The start accepts `YYYY-MM-DD HH:MM:SS`, the ISO `T`-separated form, and
/// either of those without seconds. Zone offsets and fractional seconds are
/// not accepted.
///
/// # Errors
///
/// Returns `ParseFailed` if the string does not split into exactly two sides
/// or the start side matches none of the accepted layouts.
pub fn resolve_start_timestamp(date_range: &str) -> AppResult<i64> {
    let sides: Vec<&str> = date_range.split(DATE_RANGE_SEPARATOR).collect();
    let [start, _end] = sides.as_slice() else {
        return Err(AppError::new(
            ErrorCode::ParseFailed,
            format!("date range `{date_range}` is not of the form `<start> - <end>`"),
        ));
    };

    let start = start.trim();
    let naive = EXPORT_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(start, format).ok())
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::ParseFailed,
                format!("date range start `{start}` is not a valid date-time"),
            )
        })?;

    Ok(naive.and_utc().timestamp())
}

/// Inclusive UTC window covering whole days from `earliest` to `latest`
///
/// Starts at 00:00:00.000 of the earliest day and ends at 23:59:59.999 of
/// the latest day.
#[must_use]
pub fn day_window(earliest: i64, latest: i64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first_day = Utc.timestamp_opt(earliest, 0).single()?.date_naive();
    let last_day = Utc.timestamp_opt(latest, 0).single()?.date_naive();

    let start = first_day.and_time(NaiveTime::MIN).and_utc();
    let end = last_day.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
        - Duration::milliseconds(1);

    Some((start, end))
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.sss+00:00`
#[must_use]
pub fn to_iso8601_millis(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}
