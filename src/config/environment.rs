// ABOUTME: Import configuration loaded once from environment variables at startup
// ABOUTME: Store credentials, collections, score bounds, invalid-row policy, and HTTP listen settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Everything is read and validated here, once. The resulting
//! [`ImportConfig`] is immutable and handed to every component explicitly;
//! nothing downstream reads the process environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use runlog_core::{AppError, AppResult, ScoreBounds};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{defaults, env_vars};

/// What the pipeline does with a row whose values make derivation undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Drop the row, report it in the summary, keep going
    #[default]
    Skip,
    /// Fail the whole batch before anything is emitted
    Reject,
}

impl FromStr for InvalidRowPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::config_invalid(format!(
                "{} must be `skip` or `reject`, got `{other}`",
                env_vars::INVALID_ROW_POLICY
            ))),
        }
    }
}

impl fmt::Display for InvalidRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Connection settings for the GraphJSON time-series store
#[derive(Clone)]
pub struct GraphJsonConfig {
    /// API key sent with every call
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Timeout applied to each lookup and log call
    pub timeout_secs: u64,
    /// Collection receiving activities
    pub runs_collection: String,
    /// Collection receiving zone records
    pub zones_collection: String,
}

impl fmt::Debug for GraphJsonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphJsonConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("runs_collection", &self.runs_collection)
            .field("zones_collection", &self.zones_collection)
            .finish()
    }
}

/// Process-wide import configuration
#[derive(Clone)]
pub struct ImportConfig {
    /// Time-series store settings
    pub graphjson: GraphJsonConfig,
    /// Secret the `api-key` header must equal
    pub import_api_key: String,
    /// Validated score bounds
    pub score_bounds: ScoreBounds,
    /// Invalid-row handling
    pub invalid_row_policy: InvalidRowPolicy,
    /// HTTP listen address
    pub host: String,
    /// HTTP listen port
    pub http_port: u16,
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportConfig")
            .field("graphjson", &self.graphjson)
            .field("import_api_key", &"[REDACTED]")
            .field("score_bounds", &self.score_bounds)
            .field("invalid_row_policy", &self.invalid_row_policy)
            .field("host", &self.host)
            .field("http_port", &self.http_port)
            .finish()
    }
}

/// Typed access to a key/value source
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> AppResult<String> {
        self.optional(key)
            .ok_or_else(|| AppError::config_missing(key))
    }

    fn parse<T>(key: &str, raw: &str) -> AppResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        raw.parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value `{raw}`: {e}")))
    }

    fn required_parsed<T>(&self, key: &str) -> AppResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        Self::parse(key, &self.required(key)?)
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.optional(key)
            .map_or(Ok(default), |raw| Self::parse(key, &raw))
    }
}

impl ImportConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` naming the first absent required variable,
    /// or `ConfigInvalid` for unparseable or inconsistent values.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    ///
    /// # Errors
    ///
    /// Same as [`ImportConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let graphjson = GraphJsonConfig {
            api_key: vars.required(env_vars::GRAPHJSON_API_KEY)?,
            base_url: vars
                .optional(env_vars::GRAPHJSON_BASE_URL)
                .unwrap_or_else(|| defaults::GRAPHJSON_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            timeout_secs: vars
                .parsed_or(env_vars::GRAPHJSON_TIMEOUT_SECS, defaults::GRAPHJSON_TIMEOUT_SECS)?,
            runs_collection: vars.required(env_vars::GRAPHJSON_COLLECTION_RUNS)?,
            zones_collection: vars.required(env_vars::GRAPHJSON_COLLECTION_ZONES)?,
        };
        if graphjson.timeout_secs == 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_vars::GRAPHJSON_TIMEOUT_SECS
            )));
        }

        let import_api_key = vars.required(env_vars::IMPORT_API_KEY)?;

        let score_bounds = ScoreBounds::new(
            vars.required_parsed(env_vars::SCORE_PACE_LOWER_BOUND)?,
            vars.required_parsed(env_vars::SCORE_PACE_UPPER_BOUND)?,
            vars.required_parsed(env_vars::SCORE_HR_LOWER_BOUND)?,
            vars.required_parsed(env_vars::SCORE_HR_UPPER_BOUND)?,
        )?;

        Ok(Self {
            graphjson,
            import_api_key,
            score_bounds,
            invalid_row_policy: vars
                .parsed_or(env_vars::INVALID_ROW_POLICY, InvalidRowPolicy::default())?,
            host: vars
                .optional(env_vars::HOST)
                .unwrap_or_else(|| defaults::HOST.to_owned()),
            http_port: vars.parsed_or(env_vars::HTTP_PORT, defaults::HTTP_PORT)?,
        })
    }

    /// Log-safe configuration summary; secrets are never included
    #[must_use]
    pub fn summary(&self) -> String {
        let pace = self.score_bounds.pace();
        let heart_rate = self.score_bounds.heart_rate();
        format!(
            "Runlog Configuration:\n\
             - Listen: {}:{}\n\
             - Store: {} (timeout {}s)\n\
             - Collections: runs={} zones={}\n\
             - Score bounds: pace {}..{} min/km, heart rate {}..{} bpm\n\
             - Invalid rows: {}\n\
             - Credentials: [REDACTED]",
            self.host,
            self.http_port,
            self.graphjson.base_url,
            self.graphjson.timeout_secs,
            self.graphjson.runs_collection,
            self.graphjson.zones_collection,
            pace.lower(),
            pace.upper(),
            heart_rate.lower(),
            heart_rate.upper(),
            self.invalid_row_policy,
        )
    }
}
