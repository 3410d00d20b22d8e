// ABOUTME: Unified error handling with standard error codes and HTTP status mapping
// ABOUTME: Defines AppError, ErrorCode, and the recipe search and generation error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error handling for the diet planner. Domain errors raised by the
//! external clients (`RecipeSearchError`, `GenerationError`) convert into
//! `AppError`, which carries an `ErrorCode` that decides the HTTP status and the
//! message shown to the user. The detailed `message` is for logs only.

mod generation;
mod recipe;

pub use generation::GenerationError;
pub use recipe::RecipeSearchError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// The submitted form or filter values are invalid
    InvalidInput,
    /// A numeric value is outside the accepted range
    ValueOutOfRange,

    // Resources
    /// The requested page or upstream resource does not exist
    ResourceNotFound,
    /// The path exists but not for this HTTP method
    MethodNotAllowed,

    // External services
    /// The upstream service returned an error or an unexpected body
    ExternalServiceError,
    /// The upstream service could not be reached or is not configured
    ExternalServiceUnavailable,
    /// The upstream service rejected our credentials
    ExternalAuthFailed,
    /// The upstream service quota is exhausted
    ExternalRateLimited,

    // Configuration
    /// A required configuration value is missing
    ConfigMissing,
    /// A configuration value could not be parsed or is inconsistent
    ConfigInvalid,

    // Internal
    /// Unexpected failure inside the application
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => 400,
            Self::ResourceNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed
            | Self::ExternalRateLimited => 503,
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Get a short description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not supported for this path",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Get the message shown to end users on the error page
    ///
    /// Never includes upstream details.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => {
                "Some of the values you entered are not valid. Please check the form and try again."
            }
            Self::ResourceNotFound => "We couldn't find what you were looking for.",
            Self::MethodNotAllowed => "Please start from the preferences form.",
            Self::ExternalServiceError
            | Self::ExternalAuthFailed
            | Self::ExternalRateLimited => {
                "We're having trouble generating your meal plan right now. Please try again later."
            }
            Self::ExternalServiceUnavailable => {
                "The meal planning service is unavailable right now. Please try again later."
            }
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => {
                "An unexpected error occurred. Please try again."
            }
        }
    }
}

/// Unified error type for the application
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Detailed message for logs
    pub message: String,
    /// Optional message for the error page, overriding the code's default
    pub user_message: Option<String>,
    /// Source error for error chaining
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            user_message: None,
            source: None,
        }
    }

    /// Replace the message shown to end users
    #[must_use]
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
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

    /// Message safe to show to end users
    #[must_use]
    pub fn public_message(&self) -> &str {
        self.user_message
            .as_deref()
            .unwrap_or_else(|| self.code.user_message())
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its accepted range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Missing configuration value
    #[must_use]
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{key} environment variable not set"),
        )
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether this error is a configuration error that should stop startup
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self.code, ErrorCode::ConfigMissing | ErrorCode::ConfigInvalid)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
