// ABOUTME: Text generation module with a model trait seam and Gemini implementation
// ABOUTME: Defines decoding settings, model call errors, and the GenerativeModel trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Generation
//!
//! Meal plans are written by a generative text model behind the
//! [`GenerativeModel`] trait. [`GeminiModel`] is the production
//! implementation; tests substitute their own.
//!
//! [`GenerationClient`] wraps a model handle that is either ready or
//! unavailable and turns every model-side failure into a degraded result, so
//! callers only ever see [`GenerationError::Unavailable`] as a hard error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use diet_planner::config::GeminiConfig;
//! use diet_planner::llm::GenerationClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenerationClient::from_config(&GeminiConfig::new("your_api_key"));
//! let generation = client.generate("Plan three vegan meals").await?;
//! println!("{}", generation.text());
//! # Ok(())
//! # }
//! ```
//!
//! [`GenerationError::Unavailable`]: crate::errors::GenerationError::Unavailable

/// Generation client with ready/unavailable handle and degraded results
pub mod client;
/// Layered parser for `generateContent` response envelopes
pub mod envelope;
/// Google Gemini `generateContent` model
pub mod gemini;
/// Prompt composition for meal plan generation
pub mod prompts;

pub use client::{DegradedCause, Generation, GenerationClient, ModelHandle};
pub use gemini::GeminiModel;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::constants::generation::{MAX_OUTPUT_TOKENS, TEMPERATURE, TOP_P};

/// Decoding parameters sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodingConfig {
    /// Maximum output length in tokens
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
}

impl DecodingConfig {
    /// Fixed settings used for meal plans
    pub const MEAL_PLAN: Self = Self {
        max_output_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
    };
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self::MEAL_PLAN
    }
}

/// Failure of a single model call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelCallError {
    /// The provider rejected the call for quota or rate limit reasons
    #[error("model quota exceeded: {message}")]
    QuotaExceeded {
        /// Provider message
        message: String,
    },
    /// The provider answered with an error status
    #[error("model service error (status {status}): {message}")]
    Service {
        /// Upstream status
        status: u16,
        /// Provider message
        message: String,
    },
    /// The call did not complete at the transport level
    #[error("model transport failure: {message}")]
    Transport {
        /// Transport error description
        message: String,
    },
    /// The provider answered 2xx with a body that is not JSON
    #[error("model returned a malformed body: {message}")]
    MalformedBody {
        /// Parse error description
        message: String,
    },
}

/// A generative text model
///
/// Implementations return the raw response envelope; unwrapping it is the
/// caller's job so that every model shares the same defensive parser.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier for logs
    fn model_name(&self) -> &str;

    /// Generate content for a single-turn prompt
    async fn generate_content(
        &self,
        prompt: &str,
        config: &DecodingConfig,
    ) -> Result<Value, ModelCallError>;
}
