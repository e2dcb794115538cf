// ABOUTME: Shared-secret check for the import endpoint's api-key header
// ABOUTME: Constant-time comparison; runs before any request body is read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use runlog_core::{AppError, AppResult};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Check a presented `api-key` against the configured secret
///
/// # Errors
///
/// Returns `AuthRequired` when no key was presented and `AuthInvalid` when
/// it does not match.
pub fn verify_api_key(presented: Option<&str>, expected: &str) -> AppResult<()> {
    let Some(presented) = presented else {
        warn!("Import rejected: no api-key header");
        return Err(AppError::auth_required());
    };

    // Constant-time comparison to prevent timing attacks
    if presented.as_bytes().ct_eq(expected.as_bytes()).into() {
        Ok(())
    } else {
        warn!("Import rejected: api-key mismatch");
        Err(AppError::auth_invalid())
    }
}
