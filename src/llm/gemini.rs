// ABOUTME: Google Gemini generateContent model used to write meal plans
// ABOUTME: Sends single-turn prompts with fixed decoding settings and classifies API failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Model
//!
//! Implementation of the `GenerativeModel` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` (or the legacy `GOOGLE_API_KEY`) with a key from
//! Google AI Studio. `GEMINI_MODEL` selects the model, defaulting to
//! `gemini-2.0-flash-exp`.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{DecodingConfig, GenerativeModel, ModelCallError};
use crate::config::GeminiConfig;
use crate::errors::{AppError, AppResult};

// ============================================================================
// API Request Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// Decoding settings as the API expects them
#[derive(Debug, Serialize)]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl From<&DecodingConfig> for GenerationConfig {
    fn from(config: &DecodingConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// Error document returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// ============================================================================
// Model
// ============================================================================

/// Gemini `generateContent` model
pub struct GeminiModel {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiModel {
    /// Create a model from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the API key is empty, or an internal error
    /// if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::config_missing("GEMINI_API_KEY"));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build Gemini HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            client,
        })
    }

    /// Build the `generateContent` URL for the configured model
    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request<'a>(prompt: &'a str, config: &DecodingConfig) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig::from(config),
        }
    }

    /// Classify a non-success status
    fn map_api_error(status: u16, response_text: &str) -> ModelCallError {
        let parsed = serde_json::from_str::<GeminiErrorResponse>(response_text).ok();
        let quota_status = parsed
            .as_ref()
            .and_then(|r| r.error.status.as_deref())
            .is_some_and(|s| s == "RESOURCE_EXHAUSTED");
        let message = parsed.map_or_else(
            || response_text.chars().take(200).collect(),
            |r| r.error.message,
        );

        if status == 429 || quota_status {
            ModelCallError::QuotaExceeded { message }
        } else {
            ModelCallError::Service { status, message }
        }
    }
}

impl Debug for GeminiModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiModel")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt, config), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate_content(
        &self,
        prompt: &str,
        config: &DecodingConfig,
    ) -> Result<Value, ModelCallError> {
        let request = Self::build_request(prompt, config);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelCallError::Transport {
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ModelCallError::Transport {
                message: e.without_url().to_string(),
            })?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| ModelCallError::MalformedBody {
            message: e.to_string(),
        })
    }
}
