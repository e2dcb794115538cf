// ABOUTME: Configuration module for the importer
// ABOUTME: Re-exports the environment-derived ImportConfig and its policy types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and service configuration
pub mod environment;

pub use environment::{GraphJsonConfig, ImportConfig, InvalidRowPolicy};
