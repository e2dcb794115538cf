// ABOUTME: Import orchestration: existing-record lookup, the staged pipeline, and its result types
// ABOUTME: Result types carry counts and timestamps only, never health values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Import
//!
//! Authenticate, Parse, Filter, Deduplicate, IndexLookup, NormalizeEach,
//! SkipIfExisting, ExpandZones, Emit. Stages run strictly in that order;
//! nothing is emitted unless every stage before Emit succeeded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Existing-record index lookup
pub mod existing_index;

/// Staged import pipeline
pub mod pipeline;

pub use existing_index::lookup_existing;
pub use pipeline::ImportPipeline;

/// A row left out of the import under the skip policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// Start timestamp of the skipped run
    pub timestamp: i64,
    /// Why it was skipped
    pub reason: String,
}

/// One record ready to be logged
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    /// Destination collection
    pub collection: String,
    /// Event timestamp (epoch seconds)
    pub timestamp: i64,
    /// Flat record
    pub payload: Value,
}

/// Everything the pipeline decided before Emit
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    /// Events in emission order: each activity followed by its five zones
    pub events: Vec<PendingEvent>,
    /// Size of the existing-index result
    pub filtered_timestamps_count: usize,
    /// Activities dropped because their timestamp was already logged
    pub already_logged_count: usize,
    /// Rows dropped under the skip policy
    pub skipped_rows: Vec<SkippedRow>,
}

/// Outcome reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Events delivered to the store
    pub logged_count: usize,
    /// Size of the existing-index result
    pub filtered_timestamps_count: usize,
    /// Events whose log call failed
    pub failed_count: usize,
    /// Rows dropped under the skip policy
    pub skipped_rows: Vec<SkippedRow>,
}
