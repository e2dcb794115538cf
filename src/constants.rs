// ABOUTME: Service-level constants for the importer: environment variable names and defaults
// ABOUTME: Also holds the HTTP surface literals (header, multipart field, body limit)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Domain constants of the import itself (column names, zone labels) live
//! in `runlog_core::constants`; this module holds what the service layer
//! needs.

/// Service name used in structured logs and health responses
pub const SERVICE_NAME: &str = "runlog";

/// Service version from Cargo.toml
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable names read by `ImportConfig::from_env`
pub mod env_vars {
    /// Time-series store API key
    pub const GRAPHJSON_API_KEY: &str = "GRAPHJSON_API_KEY";
    /// Activity collection
    pub const GRAPHJSON_COLLECTION_RUNS: &str = "GRAPHJSON_COLLECTION_RUNS";
    /// Heart-rate zone collection
    pub const GRAPHJSON_COLLECTION_ZONES: &str = "GRAPHJSON_COLLECTION_ZONES";
    /// Store base URL override
    pub const GRAPHJSON_BASE_URL: &str = "GRAPHJSON_BASE_URL";
    /// Timeout for every store call, in seconds
    pub const GRAPHJSON_TIMEOUT_SECS: &str = "GRAPHJSON_TIMEOUT_SECS";
    /// Secret the `api-key` request header must match
    pub const IMPORT_API_KEY: &str = "IMPORT_API_KEY";
    /// Pace lower bound (min/km)
    pub const SCORE_PACE_LOWER_BOUND: &str = "SCORE_PACE_LOWER_BOUND";
    /// Pace upper bound (min/km)
    pub const SCORE_PACE_UPPER_BOUND: &str = "SCORE_PACE_UPPER_BOUND";
    /// Heart-rate lower bound (bpm)
    pub const SCORE_HR_LOWER_BOUND: &str = "SCORE_HR_LOWER_BOUND";
    /// Heart-rate upper bound (bpm)
    pub const SCORE_HR_UPPER_BOUND: &str = "SCORE_HR_UPPER_BOUND";
    /// `skip` or `reject`
    pub const INVALID_ROW_POLICY: &str = "INVALID_ROW_POLICY";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP listen address
    pub const HOST: &str = "HOST";
}

/// Defaults for optional configuration
pub mod defaults {
    /// Public GraphJSON endpoint
    pub const GRAPHJSON_BASE_URL: &str = "https://api.graphjson.com";
    /// Store call timeout
    pub const GRAPHJSON_TIMEOUT_SECS: u64 = 30;
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;
    /// HTTP listen address
    pub const HOST: &str = "127.0.0.1";
}

/// HTTP surface literals
pub mod http {
    /// Header carrying the import secret
    pub const API_KEY_HEADER: &str = "api-key";
    /// Multipart form field holding the CSV text
    pub const CSV_FIELD: &str = "csvData";
    /// Largest accepted request body (a few years of daily runs fit easily)
    pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
}

/// Names of the external services, used in error messages and logs
pub mod service_names {
    /// Time-series store
    pub const GRAPHJSON: &str = "graphjson";
    /// Any store behind the `TimeSeriesStore` trait
    pub const TIME_SERIES_STORE: &str = "time-series store";
}
