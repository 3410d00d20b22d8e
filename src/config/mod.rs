// ABOUTME: Configuration module for the diet planner server
// ABOUTME: Environment-only configuration with optional .env file support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read once at startup from environment variables
//! (optionally seeded from a `.env` file) and shared read-only afterwards.

/// Server, recipe API, and generation API configuration
pub mod environment;

pub use environment::{GeminiConfig, RetrySettings, ServerConfig, SpoonacularConfig};
