// ABOUTME: Staged import pipeline turning a HealthExport CSV into logged activity and zone events
// ABOUTME: Everything up to Emit is decided first; Emit then logs events one at a time in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Import pipeline
//!
//! [`ImportPipeline::plan`] runs Parse through ExpandZones and returns the
//! ordered events; [`ImportPipeline::emit`] delivers them sequentially so
//! the store sees a deterministic append order. A failed log call is
//! counted and logged, never retried, and never stops the batch.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use runlog_core::constants::RUNNING_ACTIVITY;
use runlog_core::dedup::deduplicate;
use runlog_core::normalizer::normalize_row;
use runlog_core::zones::expand_zones;
use runlog_core::{Activity, AppError, AppResult, RawRow};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::existing_index::lookup_existing;
use super::{ImportPlan, ImportSummary, PendingEvent, SkippedRow};
use crate::auth::verify_api_key;
use crate::config::{ImportConfig, InvalidRowPolicy};
use crate::constants::service_names::TIME_SERIES_STORE;
use crate::csv_parser::parse_export;
use crate::external::TimeSeriesStore;

fn to_event<T: Serialize>(collection: &str, timestamp: i64, record: &T) -> AppResult<PendingEvent> {
    let payload = serde_json::to_value(record).map_err(|e| {
        AppError::internal(format!("Failed to serialize event at {timestamp}")).with_source(e)
    })?;
    Ok(PendingEvent {
        collection: collection.to_owned(),
        timestamp,
        payload,
    })
}

/// Import pipeline bound to one configuration and one store
#[derive(Clone)]
pub struct ImportPipeline {
    config: Arc<ImportConfig>,
    store: Arc<dyn TimeSeriesStore>,
}

impl ImportPipeline {
    /// Create a pipeline
    #[must_use]
    pub fn new(config: Arc<ImportConfig>, store: Arc<dyn TimeSeriesStore>) -> Self {
        Self { config, store }
    }

    fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.config.graphjson.timeout_secs)
    }

    /// Authenticate stage
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` or `AuthInvalid`.
    pub fn authenticate(&self, presented: Option<&str>) -> AppResult<()> {
        verify_api_key(presented, &self.config.import_api_key)
    }

    /// Run every stage, Authenticate through Emit
    ///
    /// # Errors
    ///
    /// Returns the first terminal failure: authorization, parse, lookup, or
    /// (under the reject policy) an invalid row. Per-event log failures are
    /// not errors; they are counted in the summary.
    pub async fn import(&self, presented: Option<&str>, csv_text: &str) -> AppResult<ImportSummary> {
        self.authenticate(presented)?;
        self.run(csv_text).await
    }

    /// Run Parse through Emit on already authenticated input
    ///
    /// # Errors
    ///
    /// Same as [`ImportPipeline::import`], minus authorization.
    pub async fn run(&self, csv_text: &str) -> AppResult<ImportSummary> {
        let plan = self.plan(csv_text).await?;
        Ok(self.emit(plan).await)
    }

    /// Run Parse through ExpandZones without emitting anything
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed`, `ExternalLookupFailed`,
    /// `ExternalLookupTimeout`, or `InvalidRow` under the reject policy.
    pub async fn plan(&self, csv_text: &str) -> AppResult<ImportPlan> {
        let rows = parse_export(csv_text)?;
        let parsed_count = rows.len();

        let runs: Vec<RawRow> = rows
            .into_iter()
            .filter(|row| row.activity == RUNNING_ACTIVITY)
            .collect();
        let running_count = runs.len();

        let runs = deduplicate(runs);
        info!(
            parsed_count,
            running_count,
            unique_runs = runs.len(),
            "Export parsed and deduplicated"
        );

        let runs_collection = &self.config.graphjson.runs_collection;
        let existing = lookup_existing(
            self.store.as_ref(),
            runs_collection,
            &runs,
            self.store_timeout(),
        )
        .await?;

        let (activities, skipped_rows) = self.normalize_all(&runs)?;
        let (fresh, already_logged_count) = Self::skip_existing(activities, &existing);

        let events = self.expand(&fresh)?;
        info!(
            existing_count = existing.len(),
            already_logged_count,
            skipped_count = skipped_rows.len(),
            event_count = events.len(),
            "Import planned"
        );

        Ok(ImportPlan {
            events,
            filtered_timestamps_count: existing.len(),
            already_logged_count,
            skipped_rows,
        })
    }

    /// NormalizeEach stage, applying the invalid-row policy
    fn normalize_all(&self, runs: &[RawRow]) -> AppResult<(Vec<Activity>, Vec<SkippedRow>)> {
        let collection = &self.config.graphjson.runs_collection;
        let bounds = &self.config.score_bounds;
        let mut activities = Vec::with_capacity(runs.len());
        let mut skipped = Vec::new();

        for row in runs {
            match normalize_row(row, collection, bounds) {
                Ok(activity) => activities.push(activity),
                Err(e) if self.config.invalid_row_policy == InvalidRowPolicy::Skip => {
                    warn!(timestamp = row.started_at, reason = %e.message, "Skipping invalid row");
                    skipped.push(SkippedRow {
                        timestamp: row.started_at,
                        reason: e.message,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((activities, skipped))
    }

    /// SkipIfExisting stage
    fn skip_existing(activities: Vec<Activity>, existing: &HashSet<i64>) -> (Vec<Activity>, usize) {
        let before = activities.len();
        let fresh: Vec<Activity> = activities
            .into_iter()
            .filter(|activity| {
                let logged = existing.contains(&activity.timestamp);
                if logged {
                    debug!(timestamp = activity.timestamp, "Already logged, skipping");
                }
                !logged
            })
            .collect();
        let dropped = before - fresh.len();
        (fresh, dropped)
    }

    /// ExpandZones stage: each activity followed by its five zone records
    fn expand(&self, activities: &[Activity]) -> AppResult<Vec<PendingEvent>> {
        let zones_collection = &self.config.graphjson.zones_collection;
        let mut events = Vec::with_capacity(activities.len() * 6);

        for activity in activities {
            events.push(to_event(&activity.collection, activity.timestamp, activity)?);
            for zone in expand_zones(activity, zones_collection) {
                events.push(to_event(&zone.collection, zone.timestamp, &zone)?);
            }
        }

        Ok(events)
    }

    /// Emit stage: log events one at a time, in order
    pub async fn emit(&self, plan: ImportPlan) -> ImportSummary {
        let limit = self.store_timeout();
        let mut summary = ImportSummary {
            filtered_timestamps_count: plan.filtered_timestamps_count,
            skipped_rows: plan.skipped_rows,
            ..ImportSummary::default()
        };

        for event in &plan.events {
            match self.log_one(event, limit).await {
                Ok(()) => summary.logged_count += 1,
                Err(e) => {
                    warn!(
                        collection = %event.collection,
                        timestamp = event.timestamp,
                        error = %e,
                        "Failed to log event"
                    );
                    summary.failed_count += 1;
                }
            }
        }

        info!(
            logged_count = summary.logged_count,
            failed_count = summary.failed_count,
            filtered_timestamps_count = summary.filtered_timestamps_count,
            "Import complete"
        );
        summary
    }

    async fn log_one(&self, event: &PendingEvent, limit: Duration) -> AppResult<()> {
        timeout(
            limit,
            self.store
                .log_event(&event.collection, event.timestamp, &event.payload),
        )
        .await
        .map_err(|_| {
            AppError::log_failed(
                TIME_SERIES_STORE,
                format!("no answer within {}s", limit.as_secs()),
            )
        })?
    }
}
