// ABOUTME: GraphJSON HTTP client implementing the time-series store used by the importer
// ABOUTME: Sample-window lookups via /api/visualize/samples and single-event logging via /api/log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! GraphJSON client
//!
//! Both endpoints take the API key in the JSON body. Logged records travel
//! as a JSON string in the `json` field, next to an explicit collection
//! and timestamp.
//!
//! # API Reference
//! <https://www.graphjson.com/guides/about>

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use runlog_core::date_range::to_iso8601_millis;
use runlog_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::store::TimeSeriesStore;
use crate::config::GraphJsonConfig;
use crate::constants::service_names::GRAPHJSON;

/// Timezone in which sample windows are interpreted
const SAMPLES_TIME_ZONE: &str = "UTC";

/// Graph type that returns raw samples rather than aggregates
const SAMPLES_GRAPH_TYPE: &str = "Samples";

#[derive(Debug, Serialize)]
struct LogRequest<'a> {
    api_key: &'a str,
    collection: &'a str,
    json: String,
    timestamp: i64,
}

#[derive(Debug, Serialize)]
struct SamplesRequest<'a> {
    api_key: &'a str,
    collection: &'a str,
    #[serde(rename = "IANA_time_zone")]
    iana_time_zone: &'a str,
    graph_type: &'a str,
    start: String,
    end: String,
    filters: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SamplesResponse {
    #[serde(default)]
    result: Vec<Sample>,
}

/// One stored sample; the payload is ignored
#[derive(Debug, Deserialize)]
struct Sample {
    timestamp: i64,
}

/// GraphJSON API client
pub struct GraphJsonClient {
    api_key: String,
    base_url: String,
    http_client: Client,
}

impl GraphJsonClient {
    /// Create a client with the configured per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the HTTP client cannot be built (e.g. the
    /// TLS backend fails to initialise).
    pub fn new(config: &GraphJsonConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::internal(format!("Failed to build {GRAPHJSON} HTTP client")).with_source(e)
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http_client,
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<Response, String> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(format!(
            "HTTP {status}: {}",
            response.text().await.unwrap_or_default()
        ))
    }
}

#[async_trait]
impl TimeSeriesStore for GraphJsonClient {
    async fn sample_timestamps(
        &self,
        collection: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<i64>> {
        let request = SamplesRequest {
            api_key: &self.api_key,
            collection,
            iana_time_zone: SAMPLES_TIME_ZONE,
            graph_type: SAMPLES_GRAPH_TYPE,
            start: to_iso8601_millis(&start),
            end: to_iso8601_millis(&end),
            filters: Vec::new(),
        };
        debug!(
            collection,
            start = %request.start,
            end = %request.end,
            "Querying existing samples"
        );

        let response = self
            .post("/api/visualize/samples", &request)
            .await
            .map_err(|e| AppError::lookup_failed(GRAPHJSON, e))?;

        let samples: SamplesResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup_failed(GRAPHJSON, format!("JSON parse error: {e}")))?;

        Ok(samples.result.into_iter().map(|s| s.timestamp).collect())
    }

    async fn log_event(&self, collection: &str, timestamp: i64, payload: &Value) -> AppResult<()> {
        let request = LogRequest {
            api_key: &self.api_key,
            collection,
            json: payload.to_string(),
            timestamp,
        };

        self.post("/api/log", &request)
            .await
            .map_err(|e| AppError::log_failed(GRAPHJSON, e))?;
        Ok(())
    }
}
