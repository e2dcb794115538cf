// ABOUTME: Route module organization for the importer's HTTP endpoints
// ABOUTME: Assembles import and health routes with tracing and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers
//! that delegate to the import pipeline.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::constants::http::MAX_BODY_BYTES;
use crate::import::ImportPipeline;

/// Health check and system status routes
pub mod health;
/// CSV upload routes
pub mod import;

/// Health check route handlers
pub use health::HealthRoutes;
/// Import route handlers
pub use import::ImportRoutes;

/// Build the complete application router
pub fn router(pipeline: Arc<ImportPipeline>) -> Router {
    Router::new()
        .merge(ImportRoutes::routes(pipeline))
        .merge(HealthRoutes::routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
