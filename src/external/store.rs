// ABOUTME: Abstraction over the external time-series store the importer writes to
// ABOUTME: A sample-timestamp query for idempotence and a single-event log call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use runlog_core::AppResult;
use serde_json::Value;

/// External time-series store
///
/// Implementations own transport, authentication and serialization; the
/// pipeline only sees timestamps going in and flat records going out.
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// Timestamps of every sample already logged to `collection` in
    /// `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns `ExternalLookupFailed` when the store cannot be queried.
    async fn sample_timestamps(
        &self,
        collection: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<i64>>;

    /// Log one flat record to `collection` at `timestamp`
    ///
    /// # Errors
    ///
    /// Returns `ExternalLogFailed` when the store rejects or never receives
    /// the event.
    async fn log_event(&self, collection: &str, timestamp: i64, payload: &Value) -> AppResult<()>;
}
