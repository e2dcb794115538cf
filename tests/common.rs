// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, configuration, HealthExport CSV fixtures, and a recording in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `runlog`

use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use runlog::config::ImportConfig;
use runlog::external::TimeSeriesStore;
use runlog::import::ImportPipeline;
use runlog_core::date_range::to_iso8601_millis;
use runlog_core::{AppError, AppResult};
use serde_json::Value;
use tokio::time::sleep;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const IMPORT_API_KEY: &str = "import-secret";
pub const RUNS_COLLECTION: &str = "runs_test";
pub const ZONES_COLLECTION: &str = "zones_test";

/// Complete, valid set of configuration variables
pub fn test_vars() -> HashMap<&'static str, String> {
    [
        ("GRAPHJSON_API_KEY", "store-secret"),
        ("GRAPHJSON_COLLECTION_RUNS", RUNS_COLLECTION),
        ("GRAPHJSON_COLLECTION_ZONES", ZONES_COLLECTION),
        ("IMPORT_API_KEY", IMPORT_API_KEY),
        ("SCORE_PACE_LOWER_BOUND", "4"),
        ("SCORE_PACE_UPPER_BOUND", "7"),
        ("SCORE_HR_LOWER_BOUND", "120"),
        ("SCORE_HR_UPPER_BOUND", "180"),
        ("GRAPHJSON_TIMEOUT_SECS", "5"),
    ]
    .into_iter()
    .map(|(key, value)| (key, value.to_owned()))
    .collect()
}

/// Build a configuration from a variable map
pub fn config_from(vars: &HashMap<&'static str, String>) -> AppResult<ImportConfig> {
    ImportConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Default test configuration
pub fn test_config() -> ImportConfig {
    config_from(&test_vars()).unwrap()
}

/// Pipeline over `store` with the default test configuration
pub fn test_pipeline(store: Arc<MockStore>) -> ImportPipeline {
    init_test_logging();
    ImportPipeline::new(Arc::new(test_config()), store)
}

/// HealthExport header, weather columns included
pub const EXPORT_HEADER: &str = "Date,Active energy burned(kcal),Activity,Distance(km),Duration(s),\
Elevation: Ascended(m),Elevation: Maximum(m),Elevation: Minimum(m),\
Heart rate zone: A Easy (<115bpm)(%),Heart rate zone: B Fat Burn (115-135bpm)(%),\
Heart rate zone: C Moderate Training (135-155bpm)(%),Heart rate zone: D Hard Training (155-175bpm)(%),\
Heart rate zone: E Extreme Training (>175bpm)(%),Heart rate: Average(count/min),\
Heart rate: Maximum(count/min),METs Average(kcal/hr·kg),Weather: Humidity(%),Weather: Temperature(degC)";

/// Complete running row, 2021-10-09 12:33:18 UTC (1633782798)
pub const RUN_OCT_09: &str = "2021-10-09 12:33:18 - 2021-10-09 13:23:38,584.462,Running,8.16,3020.2,\
34.38,45.912,13.117,0.002,0,0.091,0.907,0,163.78,172,11.522,,";

/// Running row without ascended elevation or METs, 2021-09-25 16:54:59 UTC (1632588899)
pub const RUN_SEP_25: &str = "2021-09-25 16:54:59 - 2021-09-25 17:48:24,553.317,Running,8.277,3194.469,\
,45.596,13.093,0.006,0.01,0.351,0.633,0,156.54,169,,,";

/// Complete running row, 2021-10-04 08:07:18 UTC (1633334838)
pub const RUN_OCT_04: &str = "2021-10-04 08:07:18 - 2021-10-04 08:40:04,364.671,Running,5.202,1966.157,\
36.58,45.724,13.158,0,0.01,0.129,0.861,0,160.121,169,11.289,,";

/// Join rows under the export header
pub fn export_csv(rows: &[&str]) -> String {
    let mut text = String::from(EXPORT_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// How the mock answers the sample lookup
#[derive(Debug, Clone, Copy, Default)]
pub enum LookupBehavior {
    #[default]
    Answer,
    Fail,
    Stall,
}

/// One recorded sample lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLookup {
    pub collection: String,
    pub start: String,
    pub end: String,
}

/// One recorded log call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub collection: String,
    pub timestamp: i64,
    pub payload: Value,
}

/// In-memory time-series store that records every call
#[derive(Debug, Default)]
pub struct MockStore {
    existing: Vec<i64>,
    lookup_behavior: LookupBehavior,
    failing_log_calls: HashSet<usize>,
    stalled_log_calls: HashSet<usize>,
    log_attempts: Mutex<usize>,
    lookups: Mutex<Vec<RecordedLookup>>,
    logged: Mutex<Vec<RecordedEvent>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps the lookup reports as already logged
    pub fn with_existing(mut self, timestamps: &[i64]) -> Self {
        self.existing = timestamps.to_vec();
        self
    }

    pub fn with_lookup(mut self, behavior: LookupBehavior) -> Self {
        self.lookup_behavior = behavior;
        self
    }

    /// Make the given zero-based log attempts fail
    pub fn failing_log_calls(mut self, attempts: &[usize]) -> Self {
        self.failing_log_calls = attempts.iter().copied().collect();
        self
    }

    /// Make the given zero-based log attempts never answer
    pub fn stalled_log_calls(mut self, attempts: &[usize]) -> Self {
        self.stalled_log_calls = attempts.iter().copied().collect();
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn lookups(&self) -> Vec<RecordedLookup> {
        self.lookups.lock().unwrap().clone()
    }

    /// Events successfully logged, in call order
    pub fn logged(&self) -> Vec<RecordedEvent> {
        self.logged.lock().unwrap().clone()
    }

    pub fn log_attempts(&self) -> usize {
        *self.log_attempts.lock().unwrap()
    }
}

#[async_trait]
impl TimeSeriesStore for MockStore {
    async fn sample_timestamps(
        &self,
        collection: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<i64>> {
        self.lookups.lock().unwrap().push(RecordedLookup {
            collection: collection.to_owned(),
            start: to_iso8601_millis(&start),
            end: to_iso8601_millis(&end),
        });

        match self.lookup_behavior {
            LookupBehavior::Answer => Ok(self.existing.clone()),
            LookupBehavior::Fail => Err(AppError::lookup_failed("mock", "HTTP 500")),
            LookupBehavior::Stall => {
                sleep(Duration::from_secs(3600)).await;
                Ok(self.existing.clone())
            }
        }
    }

    async fn log_event(&self, collection: &str, timestamp: i64, payload: &Value) -> AppResult<()> {
        let attempt = {
            let mut attempts = self.log_attempts.lock().unwrap();
            let attempt = *attempts;
            *attempts += 1;
            attempt
        };

        if self.stalled_log_calls.contains(&attempt) {
            sleep(Duration::from_secs(3600)).await;
        }
        if self.failing_log_calls.contains(&attempt) {
            return Err(AppError::log_failed("mock", "HTTP 503"));
        }

        self.logged.lock().unwrap().push(RecordedEvent {
            collection: collection.to_owned(),
            timestamp,
            payload: payload.clone(),
        });
        Ok(())
    }
}
