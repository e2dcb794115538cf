// ABOUTME: Core types and pure algorithms for the runlog health-export importer
// ABOUTME: Foundation crate with error handling, models, scoring, normalization, and deduplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Runlog Core
//!
//! Foundation crate for the runlog importer. Nothing here performs I/O;
//! every function is deterministic so the import stages can be tested in
//! isolation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: HealthExport column literals, zone labels, tunables
//! - **models**: `RawRow`, `Activity`, `ZoneRecord`
//! - **date_range**: start-of-range resolution and lookup day windows
//! - **score**: pace/heart-rate run score
//! - **normalizer**: row to activity derivation
//! - **dedup**: near-duplicate collapsing across source devices
//! - **zones**: per-zone percentage expansion

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Import constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Date range resolution
pub mod date_range;

/// Run scoring
pub mod score;

/// Row normalization
pub mod normalizer;

/// Near-duplicate row collapsing
pub mod dedup;

/// Heart-rate zone expansion
pub mod zones;

pub use errors::{AppError, AppResult, ErrorCode, ParseIssue};
pub use models::{Activity, RawRow, ZoneRecord};
pub use score::ScoreBounds;
