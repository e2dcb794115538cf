// ABOUTME: Tests for loading the importer configuration from environment variables
// ABOUTME: Covers required variables, defaults, bound validation, and the invalid-row policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::env;

use common::{config_from, test_vars, IMPORT_API_KEY, RUNS_COLLECTION, ZONES_COLLECTION};
use runlog::config::{ImportConfig, InvalidRowPolicy};
use runlog_core::ErrorCode;
use serial_test::serial;

const REQUIRED_VARS: [&str; 8] = [
    "GRAPHJSON_API_KEY",
    "GRAPHJSON_COLLECTION_RUNS",
    "GRAPHJSON_COLLECTION_ZONES",
    "IMPORT_API_KEY",
    "SCORE_PACE_LOWER_BOUND",
    "SCORE_PACE_UPPER_BOUND",
    "SCORE_HR_LOWER_BOUND",
    "SCORE_HR_UPPER_BOUND",
];

#[test]
fn test_complete_configuration_loads() {
    let config = config_from(&test_vars()).unwrap();

    assert_eq!(config.graphjson.api_key, "store-secret");
    assert_eq!(config.graphjson.runs_collection, RUNS_COLLECTION);
    assert_eq!(config.graphjson.zones_collection, ZONES_COLLECTION);
    assert_eq!(config.graphjson.timeout_secs, 5);
    assert_eq!(config.import_api_key, IMPORT_API_KEY);
    assert_eq!(config.score_bounds.pace().lower(), 4.0);
    assert_eq!(config.score_bounds.pace().upper(), 7.0);
    assert_eq!(config.score_bounds.heart_rate().lower(), 120.0);
    assert_eq!(config.score_bounds.heart_rate().upper(), 180.0);
}

#[test]
fn test_optional_values_fall_back_to_defaults() {
    let mut vars = test_vars();
    vars.remove("GRAPHJSON_TIMEOUT_SECS");

    let config = config_from(&vars).unwrap();

    assert_eq!(config.graphjson.base_url, "https://api.graphjson.com");
    assert_eq!(config.graphjson.timeout_secs, 30);
    assert_eq!(config.invalid_row_policy, InvalidRowPolicy::Skip);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 8080);
}

#[test]
fn test_each_missing_variable_is_named() {
    for name in REQUIRED_VARS {
        let mut vars = test_vars();
        vars.remove(name);

        let err = config_from(&vars).unwrap_err();

        assert_eq!(err.code, ErrorCode::ConfigMissing, "{name}");
        assert!(err.message.contains(name), "{}", err.message);
    }
}

#[test]
fn test_blank_variable_counts_as_missing() {
    let mut vars = test_vars();
    vars.insert("IMPORT_API_KEY", "   ".to_owned());

    let err = config_from(&vars).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
}

#[test]
fn test_unparseable_bound_is_invalid() {
    let mut vars = test_vars();
    vars.insert("SCORE_HR_UPPER_BOUND", "fast".to_owned());

    let err = config_from(&vars).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("SCORE_HR_UPPER_BOUND"));
}

#[test]
fn test_inverted_bounds_are_invalid() {
    let mut vars = test_vars();
    vars.insert("SCORE_PACE_LOWER_BOUND", "7".to_owned());
    vars.insert("SCORE_PACE_UPPER_BOUND", "4".to_owned());

    let err = config_from(&vars).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_equal_bounds_are_invalid() {
    let mut vars = test_vars();
    vars.insert("SCORE_HR_LOWER_BOUND", "150".to_owned());
    vars.insert("SCORE_HR_UPPER_BOUND", "150".to_owned());

    assert_eq!(
        config_from(&vars).unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
}

#[test]
fn test_zero_timeout_is_invalid() {
    let mut vars = test_vars();
    vars.insert("GRAPHJSON_TIMEOUT_SECS", "0".to_owned());

    assert_eq!(
        config_from(&vars).unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
}

#[test]
fn test_invalid_row_policy_values() {
    let mut vars = test_vars();

    vars.insert("INVALID_ROW_POLICY", "reject".to_owned());
    assert_eq!(
        config_from(&vars).unwrap().invalid_row_policy,
        InvalidRowPolicy::Reject
    );

    vars.insert("INVALID_ROW_POLICY", "ignore".to_owned());
    assert_eq!(
        config_from(&vars).unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
}

#[test]
fn test_base_url_trailing_slash_is_dropped() {
    let mut vars = test_vars();
    vars.insert("GRAPHJSON_BASE_URL", "http://localhost:9000/".to_owned());

    let config = config_from(&vars).unwrap();

    assert_eq!(config.graphjson.base_url, "http://localhost:9000");
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    let vars = test_vars();
    for (key, value) in &vars {
        env::set_var(key, value);
    }
    env::set_var("HTTP_PORT", "9191");

    let config = ImportConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9191);
    assert_eq!(config.graphjson.runs_collection, RUNS_COLLECTION);

    for key in vars.keys() {
        env::remove_var(key);
    }
    env::remove_var("HTTP_PORT");
}

#[test]
#[serial]
fn test_from_env_reports_missing_secret() {
    for (key, value) in test_vars() {
        env::set_var(key, value);
    }
    env::remove_var("GRAPHJSON_API_KEY");

    let err = ImportConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("GRAPHJSON_API_KEY"));

    for key in test_vars().keys() {
        env::remove_var(key);
    }
}
