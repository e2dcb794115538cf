// ABOUTME: External service clients used by the importer
// ABOUTME: The time-series store abstraction and its GraphJSON implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients

/// GraphJSON HTTP client
pub mod graphjson_client;

/// Time-series store trait
pub mod store;

pub use graphjson_client::GraphJsonClient;
pub use store::TimeSeriesStore;
