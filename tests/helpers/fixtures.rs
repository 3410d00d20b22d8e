// ABOUTME: Upstream fixtures shared by integration tests
// ABOUTME: Builds clients against wiremock servers and a scripted in-process model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use diet_planner::config::{GeminiConfig, SpoonacularConfig};
use diet_planner::external::{RetryConfig, SpoonacularClient};
use diet_planner::llm::{DecodingConfig, GenerationClient, GenerativeModel, ModelCallError};
use diet_planner::server::{build_router, AppState};
use diet_planner::services::MealPlanService;
use serde_json::{json, Value};

pub const TEST_SPOONACULAR_KEY: &str = "test-spoonacular-key";
pub const TEST_GEMINI_KEY: &str = "test-gemini-key";

/// Recipe client pointed at a mock server, retrying without delay
pub fn spoonacular_client(base_url: &str) -> SpoonacularClient {
    spoonacular_client_with_key(base_url, TEST_SPOONACULAR_KEY)
}

pub fn spoonacular_client_with_key(base_url: &str, api_key: &str) -> SpoonacularClient {
    let config = SpoonacularConfig::new(api_key)
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(250));
    SpoonacularClient::new(config)
        .unwrap()
        .with_retry(RetryConfig::immediate(3))
}

pub fn gemini_config(base_url: &str) -> GeminiConfig {
    GeminiConfig::new(TEST_GEMINI_KEY)
        .with_base_url(base_url)
        .with_model("gemini-test")
        .with_timeout(Duration::from_secs(2))
}

/// One-recipe `complexSearch` document
pub fn vegan_bowl_results() -> Value {
    json!({
        "results": [{"id": 1, "title": "Vegan Bowl", "calories": 480}],
        "offset": 0,
        "number": 5,
        "totalResults": 1
    })
}

/// Gemini envelope whose single candidate holds `text`
pub fn gemini_envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// In-process model returning a fixed response and recording calls
pub struct ScriptedModel {
    response: Result<Value, ModelCallError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(envelope: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(envelope),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ModelCallError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate_content(
        &self,
        prompt: &str,
        _config: &DecodingConfig,
    ) -> Result<Value, ModelCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.response.clone()
    }
}

/// Router over a mock recipe server and the given generation client
pub fn app(recipe_base_url: &str, generator: GenerationClient) -> Router {
    let service = MealPlanService::new(spoonacular_client(recipe_base_url), generator);
    build_router(Arc::new(AppState::new(service)))
}
