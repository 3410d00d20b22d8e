// ABOUTME: Typed failures of the recipe search client
// ABOUTME: Separates credential, not-found, protocol, and transient network failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Failure modes of a recipe search
///
/// Every variant is produced by the search client itself; transport errors
/// never cross its boundary unclassified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeSearchError {
    /// Filters were rejected before any network call
    #[error("Invalid search filters: {message}")]
    InvalidInput {
        /// What was wrong with the filters
        message: String,
    },

    /// Missing credential or upstream unauthorized/quota status
    #[error("Recipe API authentication failed{}: {message}", status_suffix(.status))]
    Auth {
        /// Upstream status, `None` when the credential was missing locally
        status: Option<u16>,
        /// Detail for logs
        message: String,
    },

    /// Upstream reported that the resource does not exist
    #[error("Recipe API returned not found: {message}")]
    NotFound {
        /// Detail for logs
        message: String,
    },

    /// Response body did not have the expected structure
    #[error("Recipe API returned an unexpected response: {message}")]
    Protocol {
        /// Detail for logs
        message: String,
    },

    /// Any other non-success status
    #[error("Recipe API request failed with status {status}: {message}")]
    Upstream {
        /// Upstream status
        status: u16,
        /// Detail for logs
        message: String,
    },

    /// Network-level failure that persisted through every retry
    #[error("Recipe API unreachable after {attempts} attempts: {message}")]
    TransientNetwork {
        /// Number of calls made
        attempts: u32,
        /// Last transport error
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!(" (status {s})"))
}

impl RecipeSearchError {
    /// Build an `InvalidInput` error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Credential missing before any call was attempted
    #[must_use]
    pub fn missing_credential() -> Self {
        Self::Auth {
            status: None,
            message: "recipe API key is not configured".to_owned(),
        }
    }

    /// Build a `Protocol` error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Classify a non-success upstream status
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.to_owned();
        match status {
            401 | 402 | 403 | 429 => Self::Auth {
                status: Some(status),
                message,
            },
            404 => Self::NotFound { message },
            _ => Self::Upstream { status, message },
        }
    }

    /// Stable label for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::Auth { .. } => "auth",
            Self::NotFound { .. } => "not_found",
            Self::Protocol { .. } => "protocol",
            Self::Upstream { .. } => "upstream",
            Self::TransientNetwork { .. } => "transient_network",
        }
    }
}

impl From<RecipeSearchError> for AppError {
    fn from(error: RecipeSearchError) -> Self {
        let code = match &error {
            RecipeSearchError::InvalidInput { .. } => ErrorCode::InvalidInput,
            RecipeSearchError::Auth {
                status: Some(402 | 429),
                ..
            } => ErrorCode::ExternalRateLimited,
            RecipeSearchError::Auth { .. } => ErrorCode::ExternalAuthFailed,
            RecipeSearchError::NotFound { .. } => ErrorCode::ResourceNotFound,
            RecipeSearchError::Protocol { .. } | RecipeSearchError::Upstream { .. } => {
                ErrorCode::ExternalServiceError
            }
            RecipeSearchError::TransientNetwork { .. } => ErrorCode::ExternalServiceUnavailable,
        };
        let user_message = match &error {
            RecipeSearchError::InvalidInput { message } => Some(message.clone()),
            RecipeSearchError::NotFound { .. } => {
                Some("We couldn't find any recipes for those preferences.".to_owned())
            }
            _ => None,
        };
        let app_error = Self::new(code, error.to_string()).with_source(error);
        match user_message {
            Some(message) => app_error.with_user_message(message),
            None => app_error,
        }
    }
}
