// ABOUTME: Meal plan orchestration from filters to renderable recipes
// ABOUTME: Runs recipe search, prompt composition, generation, and reconciliation in sequence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{info, instrument};

use super::reconciliation::reconcile_generation;
use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::external::{SearchOutcome, SpoonacularClient};
use crate::llm::{prompts, DegradedCause, GenerationClient};
use crate::models::{FilterSet, GeneratedRecipe, RecipeSummary};

/// Message shown when the search succeeded but nothing matched
pub const NO_MATCHING_RECIPES_MESSAGE: &str =
    "No recipes matched your preferences. Try a different diet or a higher calorie target.";

/// Everything the results page shows
#[derive(Debug, Clone)]
pub struct MealPlan {
    /// Filters the plan was built from
    pub filters: FilterSet,
    /// Recipes returned by the search, used as inspiration
    pub inspiration: Vec<RecipeSummary>,
    /// Generated recipes after reconciliation
    pub recipes: Vec<GeneratedRecipe>,
    /// Set when the generator returned placeholder or best-effort text
    pub degraded: Option<DegradedCause>,
}

/// Meal plan service owning both upstream clients
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct MealPlanService {
    recipes: SpoonacularClient,
    generator: GenerationClient,
}

impl MealPlanService {
    /// Create a service from its clients
    #[must_use]
    pub const fn new(recipes: SpoonacularClient, generator: GenerationClient) -> Self {
        Self { recipes, generator }
    }

    /// Create a service from server configuration
    ///
    /// # Errors
    ///
    /// Returns an internal error if the recipe HTTP client cannot be built
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let recipes = SpoonacularClient::new(config.spoonacular.clone())?;
        let generator = GenerationClient::from_config(&config.gemini);
        Ok(Self::new(recipes, generator))
    }

    /// Generation client
    #[must_use]
    pub const fn generation_client(&self) -> &GenerationClient {
        &self.generator
    }

    /// Build a meal plan
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for rejected filters
    /// - `ResourceNotFound` when no recipe matched or upstream answered 404
    /// - external service errors for every other search failure
    /// - `ExternalServiceUnavailable` when no generation model is available
    #[instrument(skip(self, filters), fields(diet = ?filters.diet))]
    pub async fn plan(&self, filters: FilterSet) -> AppResult<MealPlan> {
        let inspiration = match self.recipes.search(&filters).await? {
            SearchOutcome::Matches(recipes) => recipes,
            SearchOutcome::NoResults => {
                return Err(AppError::new(
                    ErrorCode::ResourceNotFound,
                    "recipe search returned no results",
                )
                .with_user_message(NO_MATCHING_RECIPES_MESSAGE));
            }
        };

        let prompt = prompts::compose(&filters, &inspiration);
        let generation = self.generator.generate(&prompt).await?;
        let recipes = reconcile_generation(&generation);

        info!(
            inspiration = inspiration.len(),
            generated = recipes.len(),
            degraded = generation.is_degraded(),
            "Meal plan ready"
        );

        Ok(MealPlan {
            filters,
            inspiration,
            recipes,
            degraded: generation.cause(),
        })
    }
}
