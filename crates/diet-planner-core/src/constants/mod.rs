// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for recipe search, text generation, and the web surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list.

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the web server binary and logging target
    pub const DIET_PLANNER_SERVER: &str = "diet-planner-server";
}

/// Environment variable names read at startup
pub mod env_config {
    /// HTTP listener port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP listener host
    pub const HOST: &str = "HOST";
    /// Spoonacular API key
    pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
    /// Spoonacular base URL override
    pub const SPOONACULAR_BASE_URL: &str = "SPOONACULAR_BASE_URL";
    /// Per-call timeout for recipe search
    pub const RECIPE_API_TIMEOUT_SECS: &str = "RECIPE_API_TIMEOUT_SECS";
    /// Maximum attempts for recipe search (including the first)
    pub const RECIPE_API_MAX_ATTEMPTS: &str = "RECIPE_API_MAX_ATTEMPTS";
    /// Backoff floor in milliseconds
    pub const RECIPE_API_RETRY_FLOOR_MS: &str = "RECIPE_API_RETRY_FLOOR_MS";
    /// Backoff ceiling in milliseconds
    pub const RECIPE_API_RETRY_CEILING_MS: &str = "RECIPE_API_RETRY_CEILING_MS";
    /// Enable backoff jitter
    pub const RECIPE_API_RETRY_JITTER: &str = "RECIPE_API_RETRY_JITTER";
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Legacy name for the Gemini API key
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    /// Gemini base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Gemini model name
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Per-call timeout for text generation
    pub const GENERATION_TIMEOUT_SECS: &str = "GENERATION_TIMEOUT_SECS";
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Spoonacular API base URL
    pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
    /// Gemini API base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Gemini model used for meal plan generation
    pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
}

/// Recipe search limits and retry policy
pub mod recipe_search {
    /// Number of recipes requested per search
    pub const RESULT_COUNT: u32 = 5;
    /// Per-call timeout in seconds
    pub const TIMEOUT_SECS: u64 = 5;
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 3;
    /// Maximum attempts including the first call
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Lower bound of the backoff delay
    pub const RETRY_FLOOR_MS: u64 = 200;
    /// Upper bound of the backoff delay
    pub const RETRY_CEILING_MS: u64 = 2_000;
    /// Largest configurable backoff ceiling (single-digit seconds)
    pub const MAX_RETRY_CEILING_MS: u64 = 9_999;
    /// Largest configurable per-call timeout
    pub const MAX_TIMEOUT_SECS: u64 = 9;
    /// Path of the complex search endpoint
    pub const COMPLEX_SEARCH_PATH: &str = "/recipes/complexSearch";
    /// Upper bound on body text kept in error messages
    pub const ERROR_BODY_SNIPPET_LEN: usize = 400;
}

/// Fixed decoding parameters for meal plan generation
pub mod generation {
    /// Maximum output length in tokens
    pub const MAX_OUTPUT_TOKENS: u32 = 500;
    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;
    /// Nucleus sampling threshold
    pub const TOP_P: f32 = 0.9;
    /// Per-call timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;
    /// Text returned when the model produced no candidates
    pub const NO_CONTENT_PLACEHOLDER: &str =
        "The meal plan generator did not return any suggestions for these preferences. \
         Try adjusting your filters and submitting again.";
    /// Text returned when the model call failed
    pub const TEMPORARILY_UNAVAILABLE_PLACEHOLDER: &str =
        "Meal plan generation is temporarily unavailable. Please try again in a few minutes.";
}

/// Prompt composition limits
pub mod prompts {
    /// Ingredients shown per inspiration recipe
    pub const MAX_INGREDIENTS_PER_RECIPE: usize = 5;
}

/// Labels used when reshaping generated text
pub mod reconciliation {
    /// Title of the synthetic entry wrapping unstructured text
    pub const FALLBACK_TITLE: &str = "Your Meal Plan";
}

/// Form validation limits
pub mod limits {
    /// Smallest accepted meals-per-day value
    pub const MIN_MEALS_PER_DAY: u8 = 2;
    /// Largest accepted meals-per-day value
    pub const MAX_MEALS_PER_DAY: u8 = 5;
}

/// Sentinel values in normalized data
pub mod sentinels {
    /// Serialized form of an unknown calorie count
    pub const UNKNOWN_CALORIES: &str = "unknown";
}
