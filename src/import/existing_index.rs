// ABOUTME: Looks up the timestamps already logged for the days a batch covers
// ABOUTME: Makes re-imports idempotent; a failed or stalled lookup fails the batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::time::Duration;

use runlog_core::date_range::day_window;
use runlog_core::{AppError, AppResult, RawRow};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::constants::service_names::TIME_SERIES_STORE;
use crate::external::TimeSeriesStore;

/// Timestamps already present in `collection` for the whole days spanned
/// by `rows`
///
/// An empty batch yields an empty set without contacting the store.
///
/// # Errors
///
/// Returns the store's `ExternalLookupFailed` unchanged, or
/// `ExternalLookupTimeout` when no answer arrives within `limit`. A failed
/// lookup is never treated as "nothing logged yet".
pub async fn lookup_existing(
    store: &dyn TimeSeriesStore,
    collection: &str,
    rows: &[RawRow],
    limit: Duration,
) -> AppResult<HashSet<i64>> {
    let timestamps = rows.iter().map(|row| row.started_at);
    let (Some(earliest), Some(latest)) = (timestamps.clone().min(), timestamps.max()) else {
        debug!("Empty batch, skipping existing-record lookup");
        return Ok(HashSet::new());
    };

    let (start, end) = day_window(earliest, latest).ok_or_else(|| {
        AppError::internal(format!(
            "Batch timestamps {earliest}..{latest} fall outside the representable range"
        ))
    })?;

    let existing = timeout(limit, store.sample_timestamps(collection, start, end))
        .await
        .map_err(|_| AppError::lookup_timeout(TIME_SERIES_STORE, limit.as_secs()))??;

    let index: HashSet<i64> = existing.into_iter().collect();
    info!(
        collection,
        existing_count = index.len(),
        "Existing-record lookup complete"
    );
    Ok(index)
}
