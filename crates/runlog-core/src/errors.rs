// ABOUTME: Unified error type, error codes, and HTTP error response shapes for the importer
// ABOUTME: Covers authorization, batch parse, invalid row, external lookup/log, and config failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the importer returns [`AppResult`]. The
//! [`ErrorCode`] decides the HTTP status and the stable wire name; the
//! message is human readable and never carries health values.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authorization
    /// The `api-key` header was not supplied
    AuthRequired,
    /// The `api-key` header did not match the configured secret
    AuthInvalid,

    // Input
    /// One or more rows failed to parse against the export schema
    ParseFailed,
    /// A structurally valid row makes derivation undefined
    InvalidRow,
    /// Generic malformed request (e.g. missing multipart field)
    InvalidInput,

    // External services
    /// The existing-record lookup failed
    ExternalLookupFailed,
    /// The existing-record lookup did not answer in time
    ExternalLookupTimeout,
    /// A single event log call failed
    ExternalLogFailed,

    // Configuration
    /// A required configuration value is absent
    ConfigMissing,
    /// A configuration value is present but unusable
    ConfigInvalid,

    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ParseFailed | Self::InvalidInput => 400,
            Self::AuthRequired | Self::AuthInvalid => 401,
            Self::InvalidRow => 422,
            Self::ExternalLookupFailed | Self::ExternalLogFailed => 502,
            Self::ExternalLookupTimeout => 504,
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "An api-key header is required",
            Self::AuthInvalid => "The provided api-key is not valid",
            Self::ParseFailed => "The uploaded export could not be parsed",
            Self::InvalidRow => "A row contains values that cannot be normalized",
            Self::InvalidInput => "The request is malformed",
            Self::ExternalLookupFailed => "Looking up existing records failed",
            Self::ExternalLookupTimeout => "Looking up existing records timed out",
            Self::ExternalLogFailed => "Logging an event to the time-series store failed",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// One row-level parse failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    /// 1-based line in the source text (the header is line 1), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// What went wrong
    pub message: String,
}

impl ParseIssue {
    /// Create an issue for a known source line
    pub fn at_line(line: u64, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Unified error type for the importer
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details rendered into the response body
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Missing `api-key` header
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Missing api-key header")
    }

    /// Wrong `api-key` header
    #[must_use]
    pub fn auth_invalid() -> Self {
        Self::new(ErrorCode::AuthInvalid, "Invalid api-key")
    }

    /// Batch-level parse failure carrying every row-level issue
    #[must_use]
    pub fn parse_failed(issues: &[ParseIssue]) -> Self {
        Self::new(
            ErrorCode::ParseFailed,
            format!("{} row(s) failed to parse", issues.len()),
        )
        .with_details(json!({ "issues": issues }))
    }

    /// Row values make derivation undefined
    pub fn invalid_row(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRow, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Existing-record lookup failed
    pub fn lookup_failed(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalLookupFailed,
            format!("{service}: {}", message.into()),
        )
    }

    /// Existing-record lookup timed out
    #[must_use]
    pub fn lookup_timeout(service: &str, timeout_secs: u64) -> Self {
        Self::new(
            ErrorCode::ExternalLookupTimeout,
            format!("{service}: no answer within {timeout_secs}s"),
        )
    }

    /// A single event log call failed
    pub fn log_failed(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalLogFailed,
            format!("{service}: {}", message.into()),
        )
    }

    /// Required configuration missing
    #[must_use]
    pub fn config_missing(variable: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("Missing environment variable {variable}"),
        )
    }

    /// Configuration value unusable
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Row-level issues carried by a `ParseFailed` error
    #[must_use]
    pub fn parse_issues(&self) -> Vec<ParseIssue> {
        self.details
            .get("issues")
            .and_then(|issues| serde_json::from_value(issues.clone()).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error body
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details, omitted when empty
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse::from(self))).into_response()
        }
    }
}
