// ABOUTME: Hard failure of the text generation client
// ABOUTME: Only raised when the model handle was never initialized
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Hard failures of meal plan generation
///
/// Failures of an initialized model are reported as degraded results with
/// placeholder text, so the only hard failure is an unusable handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The model handle was never initialized
    #[error("Text generation is unavailable: {reason}")]
    Unavailable {
        /// Why the handle could not be initialized
        reason: String,
    },
}

impl GenerationError {
    /// Build an `Unavailable` error
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, error.to_string())
            .with_user_message(
                "Meal plan generation is not available right now. Please try again later.",
            )
            .with_source(error)
    }
}
