// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates environment loading, defaults, secret handling, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use diet_planner::config::environment::ServerConfig;
use diet_planner::errors::ErrorCode;
use serial_test::serial;

const ALL_VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "SPOONACULAR_API_KEY",
    "SPOONACULAR_BASE_URL",
    "RECIPE_API_TIMEOUT_SECS",
    "RECIPE_API_MAX_ATTEMPTS",
    "RECIPE_API_RETRY_FLOOR_MS",
    "RECIPE_API_RETRY_CEILING_MS",
    "RECIPE_API_RETRY_JITTER",
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_MODEL",
    "GENERATION_TIMEOUT_SECS",
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

fn set_keys() {
    env::set_var("SPOONACULAR_API_KEY", "spoon-secret");
    env::set_var("GEMINI_API_KEY", "gemini-secret");
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    set_keys();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.spoonacular.base_url, "https://api.spoonacular.com");
    assert_eq!(config.spoonacular.timeout, Duration::from_secs(5));
    assert_eq!(config.spoonacular.retry.max_attempts, 3);
    assert_eq!(config.spoonacular.retry.floor_ms, 200);
    assert_eq!(config.spoonacular.retry.ceiling_ms, 2_000);
    assert!(config.spoonacular.retry.jitter_enabled);
    assert_eq!(config.gemini.model, "gemini-2.0-flash-exp");
    assert_eq!(config.gemini.timeout, Duration::from_secs(30));

    clear_env();
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    set_keys();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("SPOONACULAR_BASE_URL", "http://localhost:4000/");
    env::set_var("RECIPE_API_MAX_ATTEMPTS", "2");
    env::set_var("RECIPE_API_RETRY_JITTER", "false");
    env::set_var("GEMINI_MODEL", "gemini-1.5-flash");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.spoonacular.base_url, "http://localhost:4000");
    assert_eq!(config.spoonacular.retry.max_attempts, 2);
    assert!(!config.spoonacular.retry.jitter_enabled);
    assert_eq!(config.gemini.model, "gemini-1.5-flash");

    let config = config.with_overrides(Some(3000), Some("0.0.0.0".to_owned()));
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.host, "0.0.0.0");

    clear_env();
}

#[test]
#[serial]
fn test_missing_recipe_key_is_fatal() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gemini-secret");

    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains("SPOONACULAR_API_KEY"));
    assert!(error.is_configuration_error());

    clear_env();
}

#[test]
#[serial]
fn test_google_api_key_fallback() {
    clear_env();
    env::set_var("SPOONACULAR_API_KEY", "spoon-secret");
    env::set_var("GOOGLE_API_KEY", "google-secret");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.gemini.api_key, "google-secret");

    env::remove_var("GOOGLE_API_KEY");
    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains("GEMINI_API_KEY"));

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_values_are_invalid() {
    for (key, value) in [
        ("HTTP_PORT", "eighty"),
        ("RECIPE_API_MAX_ATTEMPTS", "-1"),
        ("RECIPE_API_RETRY_JITTER", "maybe"),
    ] {
        clear_env();
        set_keys();
        env::set_var(key, value);

        let error = ServerConfig::from_env().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid, "{key}={value}");
    }
    clear_env();
}

#[test]
#[serial]
fn test_inconsistent_retry_bounds() {
    clear_env();
    set_keys();
    env::set_var("RECIPE_API_RETRY_FLOOR_MS", "5000");
    env::set_var("RECIPE_API_RETRY_CEILING_MS", "100");
    assert_eq!(
        ServerConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    clear_env();
    set_keys();
    env::set_var("RECIPE_API_MAX_ATTEMPTS", "0");
    assert_eq!(
        ServerConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    clear_env();
}

#[test]
#[serial]
fn test_retry_and_timeout_upper_bounds() {
    for (key, value) in [
        ("RECIPE_API_MAX_ATTEMPTS", "4"),
        ("RECIPE_API_MAX_ATTEMPTS", "10"),
        ("RECIPE_API_RETRY_CEILING_MS", "10000"),
        ("RECIPE_API_TIMEOUT_SECS", "10"),
        ("RECIPE_API_TIMEOUT_SECS", "60"),
    ] {
        clear_env();
        set_keys();
        env::set_var(key, value);

        let error = ServerConfig::from_env().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid, "{key}={value}");
        assert!(error.message.contains(key), "{key}={value}: {}", error.message);
    }

    clear_env();
    set_keys();
    env::set_var("RECIPE_API_MAX_ATTEMPTS", "3");
    env::set_var("RECIPE_API_RETRY_CEILING_MS", "9999");
    env::set_var("RECIPE_API_TIMEOUT_SECS", "9");
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.spoonacular.retry.max_attempts, 3);
    assert_eq!(config.spoonacular.timeout, Duration::from_secs(9));

    clear_env();
}

#[test]
#[serial]
fn test_summary_redacts_secrets() {
    clear_env();
    set_keys();

    let summary = ServerConfig::from_env().unwrap().summary();
    assert!(!summary.contains("spoon-secret"));
    assert!(!summary.contains("gemini-secret"));
    assert!(summary.contains("key set"));

    clear_env();
}
