// ABOUTME: HTTP handler for HealthExport CSV uploads
// ABOUTME: Checks the api-key header before touching the multipart body, then runs the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Import routes
//!
//! `POST /api/import` takes a multipart form whose `csvData` field holds
//! the CSV text. Success returns counts only.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use runlog_core::{AppError, AppResult};
use tracing::{debug, info};

use crate::constants::http::{API_KEY_HEADER, CSV_FIELD};
use crate::import::ImportPipeline;

/// Import routes
pub struct ImportRoutes;

impl ImportRoutes {
    /// Create the import routes
    pub fn routes(pipeline: Arc<ImportPipeline>) -> Router {
        Router::new()
            .route("/api/import", post(Self::handle_import))
            .with_state(pipeline)
    }

    /// Read the CSV text out of the `csvData` field
    async fn read_csv_field(mut multipart: Multipart) -> AppResult<String> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Invalid multipart body: {e}")))?
        {
            if field.name() == Some(CSV_FIELD) {
                return field.text().await.map_err(|e| {
                    AppError::invalid_input(format!("Unreadable `{CSV_FIELD}` field: {e}"))
                });
            }
            debug!(field = ?field.name(), "Ignoring multipart field");
        }

        Err(AppError::invalid_input(format!(
            "Missing multipart field `{CSV_FIELD}`"
        )))
    }

    /// Handle a CSV upload
    async fn handle_import(
        State(pipeline): State<Arc<ImportPipeline>>,
        headers: HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Response, AppError> {
        let presented = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        pipeline.authenticate(presented)?;

        let multipart = multipart
            .map_err(|e| AppError::invalid_input(format!("Expected a multipart form: {e}")))?;
        let csv_text = Self::read_csv_field(multipart).await?;
        info!(bytes = csv_text.len(), "Received export upload");

        let summary = pipeline.run(&csv_text).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
