// ABOUTME: Spoonacular recipe search client with bounded retries and typed error classification
// ABOUTME: Builds complexSearch queries from filters and normalizes results into recipe summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Spoonacular Recipe API Client
//!
//! Searches recipes through the `complexSearch` endpoint.
//!
//! # Behavior
//! - Filters are validated before any network call
//! - A missing API key fails with `RecipeSearchError::Auth` without calling out
//! - Timeouts and refused or reset connections are retried with exponential
//!   backoff; every other failure is returned immediately
//! - One structured log record per search; the API key is never logged
//!
//! # API Reference
//! <https://spoonacular.com/food-api/docs#Search-Recipes-Complex>
//!
//! # Example
//! ```rust,no_run
//! use diet_planner::config::SpoonacularConfig;
//! use diet_planner::external::{SearchOutcome, SpoonacularClient};
//! use diet_planner::models::FilterSet;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpoonacularClient::new(SpoonacularConfig::new("your_api_key"))?;
//! let filters = FilterSet::new().with_diet("vegan").with_calorie_target(600);
//! if let SearchOutcome::Matches(recipes) = client.search(&filters).await? {
//!     println!("found {} recipes", recipes.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::time::sleep;
use tracing::instrument;

use super::retry::{is_transient, RetryConfig};
use crate::config::SpoonacularConfig;
use crate::constants::recipe_search::{
    COMPLEX_SEARCH_PATH, CONNECT_TIMEOUT_SECS, ERROR_BODY_SNIPPET_LEN, RESULT_COUNT,
};
use crate::errors::{AppError, AppResult, RecipeSearchError};
use crate::logging::AppLogger;
use crate::models::{Calories, FilterSet, RecipeSummary};

/// Result of a successful search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one recipe matched, in upstream order
    Matches(Vec<RecipeSummary>),
    /// The search succeeded but nothing matched
    NoResults,
}

impl SearchOutcome {
    /// Matched recipes, empty for `NoResults`
    #[must_use]
    pub fn recipes(&self) -> &[RecipeSummary] {
        match self {
            Self::Matches(recipes) => recipes,
            Self::NoResults => &[],
        }
    }

    /// Number of matched recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes().len()
    }

    /// Whether nothing matched
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults)
    }

    fn from_recipes(recipes: Vec<RecipeSummary>) -> Self {
        if recipes.is_empty() {
            Self::NoResults
        } else {
            Self::Matches(recipes)
        }
    }
}

/// `complexSearch` response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawRecipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    id: i64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    nutrition: Option<RawNutrition>,
    #[serde(default)]
    used_ingredients: Vec<RawIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<RawIngredient>,
    #[serde(default)]
    extended_ingredients: Vec<RawIngredient>,
}

#[derive(Debug, Deserialize)]
struct RawNutrition {
    #[serde(default)]
    nutrients: Vec<RawNutrient>,
}

#[derive(Debug, Deserialize)]
struct RawNutrient {
    #[serde(default)]
    name: String,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawIngredient {
    #[serde(default)]
    name: Option<String>,
}

impl RawRecipe {
    fn calories(&self) -> Calories {
        self.calories
            .or_else(|| {
                self.nutrition.as_ref().and_then(|nutrition| {
                    nutrition
                        .nutrients
                        .iter()
                        .find(|n| n.name.eq_ignore_ascii_case("calories"))
                        .and_then(|n| n.amount)
                })
            })
            .into()
    }

    fn into_summary(self) -> RecipeSummary {
        let calories = self.calories();
        let mut ingredients: Vec<String> = Vec::new();
        for name in self
            .used_ingredients
            .into_iter()
            .chain(self.missed_ingredients)
            .chain(self.extended_ingredients)
            .filter_map(|ingredient| ingredient.name)
        {
            let name = name.trim();
            if !name.is_empty() && !ingredients.iter().any(|known| known == name) {
                ingredients.push(name.to_owned());
            }
        }

        RecipeSummary {
            title: self.title,
            id: self.id,
            calories,
            image: self.image.filter(|url| !url.is_empty()),
            ingredients,
        }
    }
}

/// Spoonacular recipe search client
///
/// Cheap to share: holds one pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    config: SpoonacularConfig,
    retry: RetryConfig,
    http_client: reqwest::Client,
}

impl SpoonacularClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built
    pub fn new(config: SpoonacularConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build recipe HTTP client: {e}")))?;
        let retry = RetryConfig::from(&config.retry);

        Ok(Self {
            config,
            retry,
            http_client,
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Query parameters for a search, excluding the API key
    ///
    /// Absent filters are omitted.
    #[must_use]
    pub fn build_query(filters: &FilterSet) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(8);
        if let Some(keyword) = filters.search_keyword() {
            params.push(("query", keyword.to_owned()));
        }
        if let Some(calories) = filters.calorie_target {
            params.push(("maxCalories", calories.to_string()));
        }
        if let Some(diet) = &filters.diet {
            params.push(("diet", diet.clone()));
        }
        if let Some(intolerances) = &filters.intolerances {
            params.push(("intolerances", intolerances.clone()));
        }
        if let Some(excluded) = &filters.exclude_ingredients {
            params.push(("excludeIngredients", excluded.clone()));
        }
        params.push(("fillIngredients", "true".to_owned()));
        params.push(("number", RESULT_COUNT.to_string()));
        params
    }

    /// Search recipes matching the filters
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the filters are rejected (no network call)
    /// - `Auth` if the API key is missing (no network call) or upstream
    ///   answers 401, 402, 403, or 429
    /// - `NotFound` on upstream 404, `Upstream` on any other error status
    /// - `Protocol` if the response is malformed or the body is not a
    ///   `complexSearch` result document (never retried)
    /// - `TransientNetwork` once the retry budget is exhausted
    #[instrument(skip(self, filters), fields(diet = ?filters.diet, query = ?filters.search_keyword()))]
    pub async fn search(&self, filters: &FilterSet) -> Result<SearchOutcome, RecipeSearchError> {
        filters.validate()?;
        if self.config.api_key.trim().is_empty() {
            let error = RecipeSearchError::missing_credential();
            AppLogger::log_recipe_search_failure("", None, 0, error.kind(), 0);
            return Err(error);
        }

        let params = Self::build_query(filters);
        let logged_query = describe_query(&params);
        let url = format!("{}{COMPLEX_SEARCH_PATH}", self.config.base_url);
        let started = Instant::now();

        let (status, body, attempts) = match self.send_with_retry(&url, &params).await {
            Ok(response) => response,
            Err(error) => {
                let attempts = match &error {
                    RecipeSearchError::TransientNetwork { attempts, .. } => *attempts,
                    _ => 1,
                };
                AppLogger::log_recipe_search_failure(
                    &logged_query,
                    None,
                    attempts,
                    error.kind(),
                    elapsed_ms(started),
                );
                return Err(error);
            }
        };

        let outcome = if (200..300).contains(&status) {
            parse_results(&body)
        } else {
            Err(RecipeSearchError::from_status(status, &snippet(&body)))
        };

        match &outcome {
            Ok(outcome) => AppLogger::log_recipe_search(
                &logged_query,
                Some(status),
                attempts,
                outcome.len(),
                elapsed_ms(started),
            ),
            Err(error) => AppLogger::log_recipe_search_failure(
                &logged_query,
                Some(status),
                attempts,
                error.kind(),
                elapsed_ms(started),
            ),
        }
        outcome
    }

    /// Send the request, retrying transient transport failures
    ///
    /// Returns the status, the body text, and the number of calls made.
    async fn send_with_retry(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<(u16, String, u32), RecipeSearchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send_once(url, params).await {
                Ok((status, body)) => return Ok((status, body, attempt)),
                Err(e) if is_transient(&e) && self.retry.can_retry(attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    AppLogger::log_recipe_retry(
                        attempt,
                        self.retry.max_attempts,
                        u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        &transport_reason(&e),
                    );
                    sleep(delay).await;
                }
                Err(e) if is_transient(&e) => {
                    return Err(RecipeSearchError::TransientNetwork {
                        attempts: attempt,
                        message: transport_reason(&e),
                    });
                }
                // Unparseable, truncated, or otherwise malformed responses are not retried
                Err(e) => {
                    return Err(RecipeSearchError::protocol(transport_reason(&e)));
                }
            }
        }
    }

    async fn send_once(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<(u16, String), reqwest::Error> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn parse_results(body: &str) -> Result<SearchOutcome, RecipeSearchError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| RecipeSearchError::protocol(format!("invalid search response: {e}")))?;
    Ok(SearchOutcome::from_recipes(
        response
            .results
            .into_iter()
            .map(RawRecipe::into_summary)
            .collect(),
    ))
}

/// Outbound query as logged, never including the API key
fn describe_query(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Transport error text with the request URL (and its API key) removed
fn transport_reason(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "malformed response body"
    } else {
        "request failed"
    };
    let mut reason = kind.to_owned();
    let mut source = error.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
