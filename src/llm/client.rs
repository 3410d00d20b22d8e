// ABOUTME: Generation client holding a ready or unavailable model handle
// ABOUTME: Converts model failures and empty envelopes into degraded results with placeholder text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::warn;

use super::envelope::{unwrap_envelope, Unwrapped};
use super::gemini::GeminiModel;
use super::{DecodingConfig, GenerativeModel, ModelCallError};
use crate::config::GeminiConfig;
use crate::constants::generation::{NO_CONTENT_PLACEHOLDER, TEMPORARILY_UNAVAILABLE_PLACEHOLDER};
use crate::errors::GenerationError;
use crate::logging::AppLogger;

/// Why a generation is degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedCause {
    /// The model returned zero candidates
    NoCandidates,
    /// The first candidate had no recognizable text
    UnrecognizedCandidate,
    /// The provider quota was exhausted
    QuotaExceeded,
    /// The provider answered with an error status
    ServiceError,
    /// The call failed at the transport level
    Transport,
    /// The response body or envelope had the wrong shape
    MalformedEnvelope,
}

impl DegradedCause {
    /// Stable label for structured logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoCandidates => "no_candidates",
            Self::UnrecognizedCandidate => "unrecognized_candidate",
            Self::QuotaExceeded => "quota_exceeded",
            Self::ServiceError => "service_error",
            Self::Transport => "transport",
            Self::MalformedEnvelope => "malformed_envelope",
        }
    }
}

impl From<&ModelCallError> for DegradedCause {
    fn from(error: &ModelCallError) -> Self {
        match error {
            ModelCallError::QuotaExceeded { .. } => Self::QuotaExceeded,
            ModelCallError::Service { .. } => Self::ServiceError,
            ModelCallError::Transport { .. } => Self::Transport,
            ModelCallError::MalformedBody { .. } => Self::MalformedEnvelope,
        }
    }
}

/// Outcome of a generation call that did not hard-fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Model text, non-empty
    Complete(String),
    /// Placeholder or best-effort text
    Degraded {
        /// Text to show instead of a plan
        text: String,
        /// What went wrong
        cause: DegradedCause,
    },
}

impl Generation {
    /// Text to render, whatever the outcome
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Complete(text) | Self::Degraded { text, .. } => text,
        }
    }

    /// Whether the text is a placeholder or best-effort rendering
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Degradation cause, if any
    #[must_use]
    pub const fn cause(&self) -> Option<DegradedCause> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { cause, .. } => Some(*cause),
        }
    }

    fn degraded(text: impl Into<String>, cause: DegradedCause) -> Self {
        Self::Degraded {
            text: text.into(),
            cause,
        }
    }

    fn outcome_label(&self) -> &'static str {
        self.cause().map_or("complete", DegradedCause::as_str)
    }
}

/// Model handle: initialized once at startup, never re-initialized
#[derive(Clone)]
pub enum ModelHandle {
    /// A usable model
    Ready(Arc<dyn GenerativeModel>),
    /// No model could be set up
    Unavailable {
        /// Why the model could not be set up
        reason: String,
    },
}

impl ModelHandle {
    /// Model name when ready, `"unavailable"` otherwise
    #[must_use]
    pub fn status(&self) -> &str {
        match self {
            Self::Ready(model) => model.model_name(),
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

impl Debug for ModelHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(model) => f.debug_tuple("Ready").field(&model.model_name()).finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Meal plan generation client
#[derive(Debug, Clone)]
pub struct GenerationClient {
    handle: ModelHandle,
    decoding: DecodingConfig,
}

impl GenerationClient {
    /// Client over a ready model
    #[must_use]
    pub fn ready(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            handle: ModelHandle::Ready(model),
            decoding: DecodingConfig::MEAL_PLAN,
        }
    }

    /// Client whose model could not be set up
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            handle: ModelHandle::Unavailable {
                reason: reason.into(),
            },
            decoding: DecodingConfig::MEAL_PLAN,
        }
    }

    /// Client over a Gemini model, unavailable if the model cannot be built
    #[must_use]
    pub fn from_config(config: &GeminiConfig) -> Self {
        match GeminiModel::new(config) {
            Ok(model) => Self::ready(Arc::new(model)),
            Err(e) => {
                warn!("Gemini model unavailable: {e}");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Model handle
    #[must_use]
    pub const fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    /// Whether a model is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.handle, ModelHandle::Ready(_))
    }

    /// Generate text for a prompt
    ///
    /// Model failures never escape: they become `Generation::Degraded` with
    /// a placeholder text and a typed cause.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Unavailable` if the handle is unavailable,
    /// without calling any model.
    pub async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        let model = match &self.handle {
            ModelHandle::Ready(model) => model,
            ModelHandle::Unavailable { reason } => {
                return Err(GenerationError::unavailable(reason.clone()));
            }
        };

        let started = Instant::now();
        let generation = match model.generate_content(prompt, &self.decoding).await {
            Ok(envelope) => Self::interpret(&envelope),
            Err(error) => {
                warn!(error = %error, "Generation call failed");
                Generation::degraded(TEMPORARILY_UNAVAILABLE_PLACEHOLDER, (&error).into())
            }
        };

        AppLogger::log_generation(
            model.model_name(),
            generation.outcome_label(),
            generation.text().len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(generation)
    }

    fn interpret(envelope: &Value) -> Generation {
        match unwrap_envelope(envelope) {
            Ok(Unwrapped::Text(text)) => Generation::Complete(text),
            Ok(Unwrapped::BestEffort(text)) => {
                Generation::degraded(text, DegradedCause::UnrecognizedCandidate)
            }
            Ok(Unwrapped::NoCandidates) => {
                Generation::degraded(NO_CONTENT_PLACEHOLDER, DegradedCause::NoCandidates)
            }
            Err(error) => {
                warn!(error = %error, "Unexpected generation envelope");
                Generation::degraded(
                    TEMPORARILY_UNAVAILABLE_PLACEHOLDER,
                    DegradedCause::MalformedEnvelope,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpret_text() {
        let envelope = json!({"candidates": [{"content": {"parts": [{"text": "Eat well"}]}}]});
        assert_eq!(
            GenerationClient::interpret(&envelope),
            Generation::Complete("Eat well".to_owned())
        );
    }

    #[test]
    fn test_interpret_no_candidates_uses_placeholder() {
        let generation = GenerationClient::interpret(&json!({"candidates": []}));
        assert_eq!(generation.cause(), Some(DegradedCause::NoCandidates));
        assert_eq!(generation.text(), NO_CONTENT_PLACEHOLDER);
        assert!(!generation.text().is_empty());
    }

    #[test]
    fn test_interpret_malformed_envelope() {
        let generation = GenerationClient::interpret(&json!([1, 2, 3]));
        assert_eq!(generation.cause(), Some(DegradedCause::MalformedEnvelope));
    }

    #[test]
    fn test_cause_from_model_error() {
        let quota = ModelCallError::QuotaExceeded {
            message: String::new(),
        };
        assert_eq!(DegradedCause::from(&quota), DegradedCause::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_unavailable_handle_fails_fast() {
        let client = GenerationClient::unavailable("no key");
        assert!(!client.is_ready());
        let error = client.generate("anything").await.unwrap_err();
        assert_eq!(error, GenerationError::unavailable("no key"));
    }
}
