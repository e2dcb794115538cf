// ABOUTME: Main library entry point for the runlog HealthExport importer
// ABOUTME: Wires CSV parsing, existing-record lookup, normalization, and event emission
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Runlog
//!
//! Imports running activities from a HealthExport CSV into a GraphJSON
//! time-series store. Each run becomes one activity event plus five
//! heart-rate zone events; re-importing the same export logs nothing new.
//!
//! ## Architecture
//!
//! - **`runlog_core`**: errors, models, and the pure derivation steps
//! - **`csv_parser`**: strict HealthExport schema
//! - **`external`**: the `TimeSeriesStore` trait and its GraphJSON client
//! - **`import`**: the staged pipeline
//! - **`routes`** / **`server`**: the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use runlog::config::ImportConfig;
//! use runlog::external::GraphJsonClient;
//! use runlog::import::ImportPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(ImportConfig::from_env()?);
//! let store = Arc::new(GraphJsonClient::new(&config.graphjson)?);
//! let pipeline = ImportPipeline::new(config, store);
//!
//! let csv_text = std::fs::read_to_string("export.csv")?;
//! let summary = pipeline.run(&csv_text).await?;
//! println!("logged {} events", summary.logged_count);
//! # Ok(())
//! # }
//! ```

/// API-key check for the import endpoint
pub mod auth;
/// Environment-derived configuration
pub mod config;
/// Service-level constants
pub mod constants;
/// HealthExport CSV parsing
pub mod csv_parser;
/// External time-series store clients
pub mod external;
/// Staged import pipeline
pub mod import;
/// Structured logging setup
pub mod logging;
/// HTTP routes
pub mod routes;
/// HTTP server bootstrap
pub mod server;

/// Unified error handling, shared with the core crate
pub use runlog_core::errors;
