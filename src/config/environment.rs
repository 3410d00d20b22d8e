// ABOUTME: Environment configuration for the HTTP listener and both upstream APIs
// ABOUTME: Parses env vars with defaults, rejects missing secrets, and redacts them in summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::constants::{defaults, env_config, generation, recipe_search};
use crate::errors::{AppError, AppResult};

/// Retry policy settings for the recipe API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total attempts, including the first call
    pub max_attempts: u32,
    /// Smallest backoff delay in milliseconds
    pub floor_ms: u64,
    /// Largest backoff delay in milliseconds
    pub ceiling_ms: u64,
    /// Add random jitter of up to half the delay
    pub jitter_enabled: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: recipe_search::MAX_ATTEMPTS,
            floor_ms: recipe_search::RETRY_FLOOR_MS,
            ceiling_ms: recipe_search::RETRY_CEILING_MS,
            jitter_enabled: true,
        }
    }
}

/// Spoonacular recipe API configuration
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    /// API key sent as the `apiKey` query parameter
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Per-call timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetrySettings,
}

impl SpoonacularConfig {
    /// Configuration with default endpoint and retry policy
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::SPOONACULAR_BASE_URL.to_owned(),
            timeout: Duration::from_secs(recipe_search::TIMEOUT_SECS),
            retry: RetrySettings::default(),
        }
    }

    /// Override the base URL (used to point at a mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_trailing_slash(base_url.into());
        self
    }

    /// Override the per-call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry policy
    #[must_use]
    pub const fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }
}

/// Gemini generation API configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Model name (e.g. `gemini-2.0-flash-exp`)
    pub model: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Configuration with default endpoint and model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
            model: defaults::GEMINI_MODEL.to_owned(),
            timeout: Duration::from_secs(generation::TIMEOUT_SECS),
        }
    }

    /// Override the base URL (used to point at a mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_trailing_slash(base_url.into());
        self
    }

    /// Override the model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listener port
    pub http_port: u16,
    /// HTTP listener host
    pub host: String,
    /// Recipe API settings
    pub spoonacular: SpoonacularConfig,
    /// Generation API settings
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if either API key is absent, or `ConfigInvalid`
    /// if a numeric or boolean variable cannot be parsed or the retry bounds
    /// are inconsistent.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let spoonacular = SpoonacularConfig {
            api_key: required_env(env_config::SPOONACULAR_API_KEY)?,
            base_url: trim_trailing_slash(env_var_or(
                env_config::SPOONACULAR_BASE_URL,
                defaults::SPOONACULAR_BASE_URL,
            )),
            timeout: Duration::from_secs(env_parse_or(
                env_config::RECIPE_API_TIMEOUT_SECS,
                recipe_search::TIMEOUT_SECS,
            )?),
            retry: RetrySettings {
                max_attempts: env_parse_or(
                    env_config::RECIPE_API_MAX_ATTEMPTS,
                    recipe_search::MAX_ATTEMPTS,
                )?,
                floor_ms: env_parse_or(
                    env_config::RECIPE_API_RETRY_FLOOR_MS,
                    recipe_search::RETRY_FLOOR_MS,
                )?,
                ceiling_ms: env_parse_or(
                    env_config::RECIPE_API_RETRY_CEILING_MS,
                    recipe_search::RETRY_CEILING_MS,
                )?,
                jitter_enabled: env_bool_or(env_config::RECIPE_API_RETRY_JITTER, true)?,
            },
        };

        let gemini_key = match required_env(env_config::GEMINI_API_KEY) {
            Ok(key) => key,
            Err(_) => required_env(env_config::GOOGLE_API_KEY)
                .map_err(|_| AppError::config_missing(env_config::GEMINI_API_KEY))?,
        };

        let gemini = GeminiConfig {
            api_key: gemini_key,
            base_url: trim_trailing_slash(env_var_or(
                env_config::GEMINI_BASE_URL,
                defaults::GEMINI_BASE_URL,
            )),
            model: env_var_or(env_config::GEMINI_MODEL, defaults::GEMINI_MODEL),
            timeout: Duration::from_secs(env_parse_or(
                env_config::GENERATION_TIMEOUT_SECS,
                generation::TIMEOUT_SECS,
            )?),
        };

        let config = Self {
            http_port: env_parse_or(env_config::HTTP_PORT, defaults::HTTP_PORT)?,
            host: env_var_or(env_config::HOST, defaults::HOST),
            spoonacular,
            gemini,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment
    #[must_use]
    pub fn with_overrides(mut self, http_port: Option<u16>, host: Option<String>) -> Self {
        if let Some(port) = http_port {
            self.http_port = port;
        }
        if let Some(host) = host {
            self.host = host;
        }
        self
    }

    /// Validate configuration consistency
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the retry bounds or timeouts are unusable:
    /// more than 3 attempts, a backoff ceiling or recipe timeout of 10 s or
    /// more, a floor above the ceiling, or a zero timeout.
    pub fn validate(&self) -> AppResult<()> {
        let retry = &self.spoonacular.retry;
        if !(1..=recipe_search::MAX_ATTEMPTS).contains(&retry.max_attempts) {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {} (got {})",
                env_config::RECIPE_API_MAX_ATTEMPTS,
                recipe_search::MAX_ATTEMPTS,
                retry.max_attempts
            )));
        }
        if retry.ceiling_ms > recipe_search::MAX_RETRY_CEILING_MS {
            return Err(AppError::config_invalid(format!(
                "{} must be below 10000 (got {})",
                env_config::RECIPE_API_RETRY_CEILING_MS,
                retry.ceiling_ms
            )));
        }
        if retry.floor_ms > retry.ceiling_ms {
            return Err(AppError::config_invalid(format!(
                "{} ({}) must not exceed {} ({})",
                env_config::RECIPE_API_RETRY_FLOOR_MS,
                retry.floor_ms,
                env_config::RECIPE_API_RETRY_CEILING_MS,
                retry.ceiling_ms
            )));
        }
        let timeout = self.spoonacular.timeout;
        if timeout.is_zero() || timeout > Duration::from_secs(recipe_search::MAX_TIMEOUT_SECS) {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {} seconds",
                env_config::RECIPE_API_TIMEOUT_SECS,
                recipe_search::MAX_TIMEOUT_SECS
            )));
        }
        if self.gemini.timeout.is_zero() {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_config::GENERATION_TIMEOUT_SECS
            )));
        }
        Ok(())
    }

    /// Human-readable configuration summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        let retry = &self.spoonacular.retry;
        format!(
            "Diet Planner Configuration:\n\
             - Listen: {}:{}\n\
             - Recipe API: {} (key {})\n\
             - Recipe API Timeout: {}ms\n\
             - Recipe API Retry: {} attempts, {}-{}ms backoff, jitter {}\n\
             - Generation Model: {} at {} (key {})\n\
             - Generation Timeout: {}ms",
            self.host,
            self.http_port,
            self.spoonacular.base_url,
            redact(&self.spoonacular.api_key),
            self.spoonacular.timeout.as_millis(),
            retry.max_attempts,
            retry.floor_ms,
            retry.ceiling_ms,
            if retry.jitter_enabled { "on" } else { "off" },
            self.gemini.model,
            self.gemini.base_url,
            redact(&self.gemini.api_key),
            self.gemini.timeout.as_millis(),
        )
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "missing"
    } else {
        "set"
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn required_env(key: &str) -> AppResult<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config_missing(key))
}

fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e| {
            AppError::config_invalid(format!("{key} has invalid value '{}': {e}", raw.trim()))
        }),
        _ => Ok(default),
    }
}

fn env_bool_or(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::config_invalid(format!(
                "{key} has invalid boolean value '{other}'"
            ))),
        },
        Err(_) => Ok(default),
    }
}
