// ABOUTME: Run scoring from average pace and average heart rate against configured bounds
// ABOUTME: Each signal is clamped, inverted onto 0..1, floored at 0.01, and the two are multiplied
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Score engine
//!
//! Lower pace and lower heart rate both mean a better run, so a value at
//! or below its lower bound scores 1.0 and a value at or above its upper
//! bound scores the floor.

use serde::{Deserialize, Serialize};

use crate::constants::SUB_SCORE_FLOOR;
use crate::errors::{AppError, AppResult};

/// Lower/upper bound pair for one scored signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    fn new(name: &str, lower: f64, upper: f64) -> AppResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(AppError::config_invalid(format!(
                "{name} bounds must be finite numbers"
            )));
        }
        if upper <= lower {
            return Err(AppError::config_invalid(format!(
                "{name} upper bound ({upper}) must be greater than lower bound ({lower})"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Normalized sub-score of `value`, in `[SUB_SCORE_FLOOR, 1]`
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.lower, self.upper);
        let normalized = (self.upper - clamped) / (self.upper - self.lower);
        normalized.max(SUB_SCORE_FLOOR)
    }
}

/// Validated pace and heart-rate bounds, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pace: Bounds,
    heart_rate: Bounds,
}

impl ScoreBounds {
    /// Validate and build the bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` unless every bound is finite and each upper
    /// bound is strictly greater than its lower bound.
    pub fn new(pace_lower: f64, pace_upper: f64, hr_lower: f64, hr_upper: f64) -> AppResult<Self> {
        Ok(Self {
            pace: Bounds::new("pace", pace_lower, pace_upper)?,
            heart_rate: Bounds::new("heart rate", hr_lower, hr_upper)?,
        })
    }

    /// Pace bounds (minutes per km)
    #[must_use]
    pub const fn pace(&self) -> Bounds {
        self.pace
    }

    /// Heart-rate bounds (bpm)
    #[must_use]
    pub const fn heart_rate(&self) -> Bounds {
        self.heart_rate
    }
}

/// Score a run from its unrounded pace (min/km) and average heart rate (bpm)
///
/// The result lies in `[0.0001, 1]`.
#[must_use]
pub fn score_run(bounds: &ScoreBounds, pace: f64, heart_rate: f64) -> f64 {
    bounds.pace.normalize(pace) * bounds.heart_rate.normalize(heart_rate)
}
